mod action;
mod app;
mod auth;
mod config;
mod error;
mod event;
mod logging;
mod model;
mod spotify;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{error, info};

use action::{Action, Event, IoEvent};
use app::{App, InputMode, Panel};
use config::AppConfig;
use event::EventHandler;
use spotify::SpotifyClient;
use ui::theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let log_path = logging::init()?;
    info!(log = %log_path.display(), "starting tracklist");

    eprintln!("Logging in to Spotify...");
    let spotify_auth = auth::authenticate(&config).await?;
    let spotify_client = SpotifyClient::new(spotify_auth);

    eprintln!("Connected! Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config, spotify_client).await;

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!(error = %e, "exiting with error");
    }
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
    spotify_client: SpotifyClient,
) -> Result<()> {
    let (io_tx, mut io_rx) = mpsc::unbounded_channel::<IoEvent>();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let theme = Theme::with_overrides(&config.styles);
    let mut app = App::new(config, io_tx, action_tx.clone());
    let mut events = EventHandler::new(Duration::from_millis(250));

    // Network handler task
    tokio::spawn(async move {
        while let Some(io_event) = io_rx.recv().await {
            let result = handle_io_event(&spotify_client, io_event).await;
            let _ = action_tx.send(result);
        }
    });

    loop {
        terminal.draw(|f| ui::render(f, &app, &theme))?;

        tokio::select! {
            event = events.next() => {
                match event? {
                    Event::Key(key) => handle_key_event(&mut app, key),
                    Event::Paste(text) => handle_paste(&mut app, &text),
                    Event::Tick => app.on_tick(),
                    Event::Resize(_, _) => {
                        // Terminal will re-draw automatically
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if !app.running {
            break;
        }
    }

    info!("quitting");
    Ok(())
}

fn handle_paste(app: &mut App, text: &str) {
    match app.input_mode {
        InputMode::EditingSearch => {
            for c in text.chars().filter(|c| !c.is_control()) {
                app.push_search_char(c);
            }
        }
        InputMode::EditingName => {
            app.playlist_name
                .extend(text.chars().filter(|c| !c.is_control()));
        }
        InputMode::Normal => {}
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    match app.input_mode {
        InputMode::EditingSearch => {
            match key.code {
                KeyCode::Enter => {
                    app.submit_search();
                    app.input_mode = InputMode::Normal;
                }
                KeyCode::Char(c) => app.push_search_char(c),
                KeyCode::Backspace => app.pop_search_char(),
                KeyCode::Esc => app.input_mode = InputMode::Normal,
                _ => {}
            }
            return;
        }
        InputMode::EditingName => {
            match key.code {
                KeyCode::Enter => app.commit_rename(),
                KeyCode::Esc => app.cancel_rename(),
                KeyCode::Char(c) => app.playlist_name.push(c),
                KeyCode::Backspace => {
                    app.playlist_name.pop();
                }
                _ => {}
            }
            return;
        }
        InputMode::Normal => {}
    }

    // Help overlay
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('/') => app.start_search_editing(),

        KeyCode::Tab | KeyCode::BackTab => app.toggle_panel(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),

        KeyCode::Enter | KeyCode::Char('a') if app.active_panel == Panel::Results => {
            ui::search::add_selected(app);
        }
        KeyCode::Char('d') | KeyCode::Delete if app.active_panel == Panel::Playlist => {
            app.remove_selected_track();
        }

        KeyCode::Char('r') => app.start_rename(),
        KeyCode::Char('S') => {
            if let Err(e) = app.save_playlist() {
                app.set_error(e.to_string());
            }
        }

        _ => {}
    }
}

async fn handle_io_event(client: &SpotifyClient, event: IoEvent) -> Action {
    match event {
        IoEvent::Search { seq, query, limit } => match client.search_tracks(&query, limit).await {
            Ok(tracks) => Action::SearchResultsLoaded { seq, query, tracks },
            Err(e) => {
                error!(seq, %query, error = %e, "search failed");
                Action::SearchFailed {
                    seq,
                    query,
                    message: e.to_string(),
                }
            }
        },
        IoEvent::SavePlaylist { name, uris } => match client.save_playlist(&name, &uris).await {
            Ok(id) => {
                info!(%id, %name, "playlist created");
                Action::PlaylistSaved { name, uris }
            }
            Err(e) => {
                error!(%name, error = ?e, "saving playlist failed");
                Action::Error(format!("Failed to save playlist: {:#}", e))
            }
        },
    }
}
