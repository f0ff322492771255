use anyhow::{Context, Result};
use rspotify::prelude::*;
use rspotify::{AuthCodePkceSpotify, Credentials, OAuth, Token};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::AppConfig;

const CALLBACK_ADDR: &str = "127.0.0.1:8888";
const REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const SCOPES: &[&str] = &[
    "user-read-private",
    "playlist-modify-private",
    "playlist-modify-public",
];
const SUCCESS_PAGE: &str = "<html><body><h1>Logged in to Spotify!</h1>\
    <p>You can close this tab and return to the terminal.</p></body></html>";

fn token_cache_path() -> Result<PathBuf> {
    Ok(AppConfig::config_dir()?.join(".spotify_token_cache.json"))
}

pub async fn authenticate(config: &AppConfig) -> Result<AuthCodePkceSpotify> {
    let creds = Credentials::new_pkce(&config.client_id);

    let oauth = OAuth {
        redirect_uri: REDIRECT_URI.to_string(),
        scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    };

    let cache_path = token_cache_path()?;
    let rspotify_config = rspotify::Config {
        token_cached: true,
        cache_path: cache_path.clone(),
        token_refreshing: true,
        ..Default::default()
    };

    let mut spotify = AuthCodePkceSpotify::with_config(creds, oauth, rspotify_config);

    if let Some(token) = read_cached_token(&cache_path) {
        set_token(&spotify, Some(token)).await?;
        if spotify.current_user().await.is_ok() {
            info!("reusing cached Spotify token");
            return Ok(spotify);
        }
        warn!("cached Spotify token rejected, starting a fresh login");
    }

    let auth_url = spotify.get_authorize_url(None)?;

    let server = tiny_http::Server::http(CALLBACK_ADDR)
        .map_err(|e| anyhow::anyhow!("Failed to start callback server: {}", e))?;

    eprintln!("Opening browser to log in to Spotify...");
    if open::that(&auth_url).is_err() {
        eprintln!("Could not open browser. Please visit this URL manually:\n{}", auth_url);
    }

    let request = server
        .recv()
        .context("Failed to receive OAuth callback")?;

    let code = authorization_code(request.url())?;

    let header = "Content-Type: text/html"
        .parse::<tiny_http::Header>()
        .map_err(|_| anyhow::anyhow!("Invalid response header"))?;
    let _ = request.respond(tiny_http::Response::from_string(SUCCESS_PAGE).with_header(header));

    spotify.request_token(&code).await?;

    let token = spotify
        .token
        .lock()
        .await
        .map_err(|_| anyhow::anyhow!("Spotify token lock poisoned"))?
        .clone();
    if let Some(token) = token {
        let token_json = serde_json::to_string_pretty(&token)?;
        std::fs::write(&cache_path, token_json)
            .with_context(|| format!("Failed to write token cache: {}", cache_path.display()))?;
    }

    info!("logged in to Spotify");
    Ok(spotify)
}

fn read_cached_token(path: &Path) -> Option<Token> {
    let data = std::fs::read_to_string(path).ok()?;
    serde_json::from_str::<Token>(&data).ok()
}

async fn set_token(spotify: &AuthCodePkceSpotify, token: Option<Token>) -> Result<()> {
    *spotify
        .token
        .lock()
        .await
        .map_err(|_| anyhow::anyhow!("Spotify token lock poisoned"))? = token;
    Ok(())
}

/// Pulls the `code` query parameter out of the callback request path.
fn authorization_code(request_path: &str) -> Result<String> {
    let url = format!("http://{}{}", CALLBACK_ADDR, request_path);
    let parsed = url::Url::parse(&url).context("Failed to parse callback URL")?;

    if let Some((_, reason)) = parsed.query_pairs().find(|(key, _)| key == "error") {
        anyhow::bail!("Spotify login was refused: {}", reason);
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.to_string())
        .context("No authorization code in callback")
}
