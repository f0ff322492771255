use anyhow::{Context, Result};
use rspotify::model::{PlayableId, SearchResult, SearchType, TrackId};
use rspotify::prelude::*;
use rspotify::AuthCodePkceSpotify;
use tracing::debug;

use crate::model::Track;

/// Spotify accepts at most 100 items per add-to-playlist request.
const PLAYLIST_ADD_CHUNK: usize = 100;

pub struct SpotifyClient {
    client: AuthCodePkceSpotify,
}

impl SpotifyClient {
    pub fn new(client: AuthCodePkceSpotify) -> Self {
        Self { client }
    }

    pub async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        let result = self
            .client
            .search(query, SearchType::Track, None, None, Some(limit), Some(0))
            .await?;

        let tracks: Vec<Track> = match result {
            SearchResult::Tracks(page) => page.items.into_iter().filter_map(Track::from_full).collect(),
            _ => Vec::new(),
        };
        debug!(query, count = tracks.len(), "search returned");
        Ok(tracks)
    }

    /// Creates a private playlist for the current user and fills it with
    /// `uris` in order. Returns the new playlist's id.
    pub async fn save_playlist(&self, name: &str, uris: &[String]) -> Result<String> {
        let user = self
            .client
            .current_user()
            .await
            .context("Failed to look up the current Spotify user")?;

        let playlist = self
            .client
            .user_playlist_create(user.id.as_ref(), name, Some(false), None, None)
            .await
            .context("Failed to create playlist")?;

        let batches = track_batches(uris)?;
        for batch in &batches {
            let items = batch.iter().map(|id| PlayableId::Track(id.as_ref()));
            self.client
                .playlist_add_items(playlist.id.as_ref(), items, None)
                .await
                .context("Failed to add tracks to playlist")?;
        }

        debug!(name, tracks = uris.len(), batches = batches.len(), "playlist filled");
        Ok(playlist.id.id().to_string())
    }
}

/// Parses track URIs and splits them, in order, into request-sized batches.
fn track_batches(uris: &[String]) -> Result<Vec<Vec<TrackId<'static>>>> {
    let ids = uris
        .iter()
        .map(|uri| {
            TrackId::from_id_or_uri(uri.as_str())
                .map(|id| id.into_static())
                .with_context(|| format!("Invalid track URI: {}", uri))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ids
        .chunks(PLAYLIST_ADD_CHUNK)
        .map(|chunk| chunk.to_vec())
        .collect())
}
