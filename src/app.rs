use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::action::{Action, IoEvent};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::Track;

const FLASH_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingSearch,
    EditingName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Results,
    Playlist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub message: String,
    pub kind: FlashKind,
    pub shown_at: Instant,
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    pub active_panel: Panel,
    pub show_help: bool,

    // Search
    pub search_input: String,
    pub query: String,
    pub search_results: Vec<Track>,
    pub search_index: usize,
    pub searching: bool,
    /// Sequence number of the latest search request.
    pub search_seq: u64,
    search_deadline: Option<Instant>,

    // Playlist
    pub playlist_name: String,
    pub playlist_tracks: Vec<Track>,
    pub playlist_index: usize,
    pub saving: bool,
    name_backup: Option<String>,

    pub flash: Option<Flash>,

    config: AppConfig,
    io_tx: mpsc::UnboundedSender<IoEvent>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        config: AppConfig,
        io_tx: mpsc::UnboundedSender<IoEvent>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            active_panel: Panel::Results,
            show_help: false,
            search_input: String::new(),
            query: String::new(),
            search_results: Vec::new(),
            search_index: 0,
            searching: false,
            search_seq: 0,
            search_deadline: None,
            playlist_name: config.default_playlist_name.clone(),
            playlist_tracks: Vec::new(),
            playlist_index: 0,
            saving: false,
            name_backup: None,
            flash: None,
            config,
            io_tx,
            action_tx,
        }
    }

    pub fn dispatch_io(&self, event: IoEvent) {
        let _ = self.io_tx.send(event);
    }

    /// The add handler handed to every result row. It only forwards the
    /// track back into the update loop as [`Action::AddTrack`].
    pub fn add_track_handler(&self) -> impl Fn(&Track) + '_ {
        move |track: &Track| {
            let _ = self.action_tx.send(Action::AddTrack(track.clone()));
        }
    }

    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now());
    }

    fn on_tick_at(&mut self, now: Instant) {
        if let Some(deadline) = self.search_deadline {
            if now >= deadline {
                self.search_deadline = None;
                if self.search_input.trim() != self.query {
                    self.submit_search();
                }
            }
        }

        if let Some(flash) = &self.flash {
            if now.duration_since(flash.shown_at) > FLASH_TTL {
                self.flash = None;
            }
        }
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::SearchResultsLoaded { seq, query, tracks } => {
                if seq != self.search_seq {
                    debug!(seq, current = self.search_seq, %query, "dropping stale search results");
                    return;
                }
                self.search_results = tracks;
                self.search_index = 0;
                self.searching = false;
            }
            Action::SearchFailed { seq, query, message } => {
                if seq != self.search_seq {
                    debug!(seq, current = self.search_seq, %query, "dropping stale search failure");
                    return;
                }
                self.searching = false;
                self.set_error(format!("Search failed: {}", message));
            }
            Action::AddTrack(track) => self.add_track(track),
            Action::PlaylistSaved { name, uris } => self.finish_save(&name, &uris),
            Action::Error(msg) => {
                self.saving = false;
                self.set_error(msg);
            }
        }
    }

    pub fn set_info(&mut self, message: String) {
        self.set_flash(message, FlashKind::Info);
    }

    pub fn set_error(&mut self, message: String) {
        warn!(%message, "showing error");
        self.set_flash(message, FlashKind::Error);
    }

    fn set_flash(&mut self, message: String, kind: FlashKind) {
        self.flash = Some(Flash {
            message,
            kind,
            shown_at: Instant::now(),
        });
    }

    // Search

    pub fn start_search_editing(&mut self) {
        self.input_mode = InputMode::EditingSearch;
        self.active_panel = Panel::Results;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.arm_debounce(Instant::now());
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.arm_debounce(Instant::now());
    }

    fn arm_debounce(&mut self, now: Instant) {
        if self.config.search_debounce_ms > 0 {
            self.search_deadline = Some(now + Duration::from_millis(self.config.search_debounce_ms));
        }
    }

    pub fn submit_search(&mut self) {
        self.search_deadline = None;
        self.search_seq += 1;
        self.query = self.search_input.trim().to_string();
        self.search_index = 0;

        if self.query.is_empty() {
            self.search_results.clear();
            self.searching = false;
            return;
        }

        info!(seq = self.search_seq, query = %self.query, "searching");
        self.searching = true;
        self.dispatch_io(IoEvent::Search {
            seq: self.search_seq,
            query: self.query.clone(),
            limit: self.config.search_limit,
        });
    }

    // Playlist

    fn add_track(&mut self, track: Track) {
        if self.playlist_tracks.iter().any(|t| t.id == track.id) {
            debug!(id = %track.id, "track already in playlist");
            return;
        }
        debug!(id = %track.id, "adding track");
        self.playlist_tracks.push(track);
    }

    pub fn remove_selected_track(&mut self) {
        if self.playlist_index < self.playlist_tracks.len() {
            let removed = self.playlist_tracks.remove(self.playlist_index);
            debug!(id = %removed.id, "removed track");
        }
        if self.playlist_index >= self.playlist_tracks.len() {
            self.playlist_index = self.playlist_tracks.len().saturating_sub(1);
        }
    }

    pub fn start_rename(&mut self) {
        self.name_backup = Some(self.playlist_name.clone());
        self.input_mode = InputMode::EditingName;
    }

    pub fn commit_rename(&mut self) {
        self.name_backup = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_rename(&mut self) {
        if let Some(name) = self.name_backup.take() {
            self.playlist_name = name;
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn save_playlist(&mut self) -> Result<(), AppError> {
        if self.saving {
            return Err(AppError::SaveInProgress);
        }
        let name = self.playlist_name.trim();
        if name.is_empty() {
            return Err(AppError::PlaylistNameMissing);
        }
        if self.playlist_tracks.is_empty() {
            return Err(AppError::EmptyPlaylist);
        }

        let uris = self.playlist_tracks.iter().map(|t| t.uri.clone()).collect();
        info!(name, "saving playlist");
        self.saving = true;
        self.dispatch_io(IoEvent::SavePlaylist {
            name: name.to_string(),
            uris,
        });
        Ok(())
    }

    /// Drops the saved tracks from the local playlist. Tracks added while the
    /// save was running stay, and so does a name changed in the meantime.
    fn finish_save(&mut self, name: &str, uris: &[String]) {
        self.saving = false;
        self.playlist_tracks.retain(|t| !uris.contains(&t.uri));
        if self.playlist_index >= self.playlist_tracks.len() {
            self.playlist_index = self.playlist_tracks.len().saturating_sub(1);
        }
        if self.playlist_name.trim() == name {
            self.playlist_name = self.config.default_playlist_name.clone();
        }
        self.set_info(format!(
            "Saved \"{}\" with {} tracks to Spotify",
            name,
            uris.len()
        ));
    }

    pub fn playlist_duration_ms(&self) -> i64 {
        self.playlist_tracks.iter().map(|t| t.duration_ms).sum()
    }

    // Navigation

    pub fn toggle_panel(&mut self) {
        self.active_panel = match self.active_panel {
            Panel::Results => Panel::Playlist,
            Panel::Playlist => Panel::Results,
        };
    }

    pub fn move_up(&mut self) {
        let index = match self.active_panel {
            Panel::Results => &mut self.search_index,
            Panel::Playlist => &mut self.playlist_index,
        };
        *index = index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let (index, len) = match self.active_panel {
            Panel::Results => (&mut self.search_index, self.search_results.len()),
            Panel::Playlist => (&mut self.playlist_index, self.playlist_tracks.len()),
        };
        if len > 0 && *index < len - 1 {
            *index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track;

    struct Harness {
        app: App,
        io_rx: mpsc::UnboundedReceiver<IoEvent>,
        action_rx: mpsc::UnboundedReceiver<Action>,
    }

    fn harness_with(config: AppConfig) -> Harness {
        let (io_tx, io_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Harness {
            app: App::new(config, io_tx, action_tx),
            io_rx,
            action_rx,
        }
    }

    fn harness() -> Harness {
        harness_with(AppConfig {
            client_id: "test".into(),
            ..AppConfig::default()
        })
    }

    fn type_query(app: &mut App, text: &str) {
        for c in text.chars() {
            app.push_search_char(c);
        }
    }

    #[test]
    fn submit_dispatches_search_and_sets_loading() {
        let mut h = harness();
        type_query(&mut h.app, "  daft punk ");
        h.app.submit_search();

        assert_eq!(h.app.query, "daft punk");
        assert!(h.app.searching);
        assert_eq!(
            h.io_rx.try_recv().unwrap(),
            IoEvent::Search {
                seq: 1,
                query: "daft punk".into(),
                limit: 20
            }
        );
    }

    #[test]
    fn empty_submit_clears_results_without_io() {
        let mut h = harness();
        h.app.search_results = vec![track("1", "One")];
        h.app.submit_search();

        assert!(h.app.query.is_empty());
        assert!(h.app.search_results.is_empty());
        assert!(!h.app.searching);
        assert!(h.io_rx.try_recv().is_err());
    }

    #[test]
    fn results_for_current_query_clear_loading() {
        let mut h = harness();
        type_query(&mut h.app, "abc");
        h.app.submit_search();
        h.app.search_index = 3;

        h.app.update(Action::SearchResultsLoaded {
            seq: h.app.search_seq,
            query: "abc".into(),
            tracks: vec![track("1", "One"), track("2", "Two")],
        });

        assert!(!h.app.searching);
        assert_eq!(h.app.search_results.len(), 2);
        assert_eq!(h.app.search_index, 0);
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut h = harness();
        type_query(&mut h.app, "old");
        h.app.submit_search();
        let old_seq = h.app.search_seq;
        h.app.search_input.clear();
        type_query(&mut h.app, "new");
        h.app.submit_search();

        h.app.update(Action::SearchResultsLoaded {
            seq: old_seq,
            query: "old".into(),
            tracks: vec![track("1", "One")],
        });

        assert!(h.app.searching);
        assert!(h.app.search_results.is_empty());
    }

    #[test]
    fn resubmitting_same_query_waits_for_latest_response() {
        let mut h = harness();
        type_query(&mut h.app, "abc");
        h.app.submit_search();
        h.app.submit_search();

        let first = h.io_rx.try_recv().unwrap();
        let second = h.io_rx.try_recv().unwrap();
        let (IoEvent::Search { seq: first, .. }, IoEvent::Search { seq: second, .. }) =
            (first, second)
        else {
            panic!("expected two searches");
        };
        assert_ne!(first, second);

        h.app.update(Action::SearchResultsLoaded {
            seq: first,
            query: "abc".into(),
            tracks: vec![track("1", "One")],
        });
        assert!(h.app.searching);
        assert!(h.app.search_results.is_empty());

        h.app.update(Action::SearchFailed {
            seq: first,
            query: "abc".into(),
            message: "timeout".into(),
        });
        assert!(h.app.searching);
        assert!(h.app.flash.is_none());

        h.app.update(Action::SearchResultsLoaded {
            seq: second,
            query: "abc".into(),
            tracks: vec![track("2", "Two")],
        });
        assert!(!h.app.searching);
        assert_eq!(h.app.search_results, vec![track("2", "Two")]);
    }

    #[test]
    fn search_failure_clears_loading_and_flashes() {
        let mut h = harness();
        type_query(&mut h.app, "abc");
        h.app.submit_search();

        h.app.update(Action::SearchFailed {
            seq: h.app.search_seq,
            query: "abc".into(),
            message: "401 Unauthorized".into(),
        });

        assert!(!h.app.searching);
        let flash = h.app.flash.as_ref().unwrap();
        assert_eq!(flash.kind, FlashKind::Error);
        assert!(flash.message.contains("401"));
    }

    #[test]
    fn debounce_submits_after_deadline_once() {
        let mut h = harness();
        type_query(&mut h.app, "abc");
        let armed = h.app.search_deadline.unwrap();

        h.app.on_tick_at(armed - Duration::from_millis(1));
        assert!(h.io_rx.try_recv().is_err());

        h.app.on_tick_at(armed);
        assert!(matches!(h.io_rx.try_recv(), Ok(IoEvent::Search { .. })));

        h.app.on_tick_at(armed + Duration::from_secs(1));
        assert!(h.io_rx.try_recv().is_err());
    }

    #[test]
    fn zero_debounce_waits_for_enter() {
        let mut h = harness_with(AppConfig {
            client_id: "test".into(),
            search_debounce_ms: 0,
            ..AppConfig::default()
        });
        type_query(&mut h.app, "abc");
        assert!(h.app.search_deadline.is_none());
        h.app.on_tick_at(Instant::now() + Duration::from_secs(10));
        assert!(h.io_rx.try_recv().is_err());
    }

    #[test]
    fn add_handler_round_trips_through_update() {
        let mut h = harness();
        let item = track("2", "Two");
        {
            let add = h.app.add_track_handler();
            add(&item);
        }
        let action = h.action_rx.try_recv().unwrap();
        assert_eq!(action, Action::AddTrack(item.clone()));

        h.app.update(action);
        assert_eq!(h.app.playlist_tracks, vec![item]);
    }

    #[test]
    fn adding_same_track_twice_keeps_one() {
        let mut h = harness();
        h.app.update(Action::AddTrack(track("1", "One")));
        h.app.update(Action::AddTrack(track("1", "One")));
        h.app.update(Action::AddTrack(track("2", "Two")));
        assert_eq!(h.app.playlist_tracks.len(), 2);
    }

    #[test]
    fn removing_last_track_clamps_index() {
        let mut h = harness();
        h.app.update(Action::AddTrack(track("1", "One")));
        h.app.update(Action::AddTrack(track("2", "Two")));
        h.app.playlist_index = 1;

        h.app.remove_selected_track();
        assert_eq!(h.app.playlist_index, 0);
        assert_eq!(h.app.playlist_tracks[0].id, "1");

        h.app.remove_selected_track();
        h.app.remove_selected_track();
        assert!(h.app.playlist_tracks.is_empty());
        assert_eq!(h.app.playlist_index, 0);
    }

    #[test]
    fn save_validates_name_and_tracks() {
        let mut h = harness();
        assert_eq!(h.app.save_playlist(), Err(AppError::EmptyPlaylist));

        h.app.update(Action::AddTrack(track("1", "One")));
        h.app.playlist_name = "   ".into();
        assert_eq!(h.app.save_playlist(), Err(AppError::PlaylistNameMissing));
        assert!(h.io_rx.try_recv().is_err());
    }

    #[test]
    fn save_dispatches_uris_in_order_and_resets_on_success() {
        let mut h = harness();
        h.app.update(Action::AddTrack(track("b", "B")));
        h.app.update(Action::AddTrack(track("a", "A")));
        h.app.playlist_name = "Road Trip".into();

        h.app.save_playlist().unwrap();
        assert!(h.app.saving);
        assert_eq!(
            h.io_rx.try_recv().unwrap(),
            IoEvent::SavePlaylist {
                name: "Road Trip".into(),
                uris: vec!["spotify:track:b".into(), "spotify:track:a".into()],
            }
        );

        h.app.update(Action::PlaylistSaved {
            name: "Road Trip".into(),
            uris: vec!["spotify:track:b".into(), "spotify:track:a".into()],
        });
        assert!(!h.app.saving);
        assert!(h.app.playlist_tracks.is_empty());
        assert_eq!(h.app.playlist_name, "New Playlist");
        assert_eq!(h.app.flash.as_ref().unwrap().kind, FlashKind::Info);
    }

    #[test]
    fn second_save_while_saving_is_refused() {
        let mut h = harness();
        h.app.update(Action::AddTrack(track("1", "One")));

        assert_eq!(h.app.save_playlist(), Ok(()));
        assert_eq!(h.app.save_playlist(), Err(AppError::SaveInProgress));

        assert!(matches!(h.io_rx.try_recv(), Ok(IoEvent::SavePlaylist { .. })));
        assert!(h.io_rx.try_recv().is_err());

        h.app.update(Action::Error("Failed to save playlist".into()));
        h.app.update(Action::AddTrack(track("1", "One")));
        assert_eq!(h.app.save_playlist(), Ok(()));
    }

    #[test]
    fn edits_during_save_survive_completion() {
        let mut h = harness();
        h.app.update(Action::AddTrack(track("1", "One")));
        h.app.save_playlist().unwrap();
        let Ok(IoEvent::SavePlaylist { name, uris }) = h.io_rx.try_recv() else {
            panic!("expected a save request");
        };

        h.app.update(Action::AddTrack(track("2", "Two")));
        h.app.update(Action::PlaylistSaved { name, uris });

        assert!(!h.app.saving);
        assert_eq!(h.app.playlist_tracks, vec![track("2", "Two")]);
        assert_eq!(h.app.playlist_index, 0);
        assert_eq!(h.app.playlist_name, "New Playlist");
    }

    #[test]
    fn rename_during_save_is_kept() {
        let mut h = harness();
        h.app.update(Action::AddTrack(track("1", "One")));
        h.app.save_playlist().unwrap();
        h.app.playlist_name = "Part Two".into();

        h.app.update(Action::PlaylistSaved {
            name: "New Playlist".into(),
            uris: vec!["spotify:track:1".into()],
        });

        assert!(h.app.playlist_tracks.is_empty());
        assert_eq!(h.app.playlist_name, "Part Two");
    }

    #[test]
    fn cancel_rename_restores_previous_name() {
        let mut h = harness();
        h.app.start_rename();
        h.app.playlist_name.push_str(" 2");
        h.app.cancel_rename();
        assert_eq!(h.app.playlist_name, "New Playlist");
        assert_eq!(h.app.input_mode, InputMode::Normal);

        h.app.start_rename();
        h.app.playlist_name = "Mine".into();
        h.app.commit_rename();
        assert_eq!(h.app.playlist_name, "Mine");
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut h = harness();
        h.app.move_down();
        assert_eq!(h.app.search_index, 0);

        h.app.search_results = vec![track("1", "One"), track("2", "Two")];
        h.app.move_down();
        h.app.move_down();
        assert_eq!(h.app.search_index, 1);
        h.app.move_up();
        h.app.move_up();
        assert_eq!(h.app.search_index, 0);

        h.app.toggle_panel();
        assert_eq!(h.app.active_panel, Panel::Playlist);
    }

    #[test]
    fn flash_expires() {
        let mut h = harness();
        h.app.set_info("hello".into());
        let shown = h.app.flash.as_ref().unwrap().shown_at;
        h.app.on_tick_at(shown + Duration::from_secs(1));
        assert!(h.app.flash.is_some());
        h.app.on_tick_at(shown + Duration::from_secs(6));
        assert!(h.app.flash.is_none());
    }
}
