use crate::model::Track;

/// Events sent from the event handler to the main loop.
#[derive(Debug)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Paste(String),
    Tick,
    Resize(u16, u16),
}

/// IO requests sent from the app to the network handler.
#[derive(Debug, PartialEq, Eq)]
pub enum IoEvent {
    /// `seq` identifies the request so its response can be matched back to it.
    Search {
        seq: u64,
        query: String,
        limit: u32,
    },
    SavePlaylist {
        name: String,
        uris: Vec<String>,
    },
}

/// Actions dispatched to update App state.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    SearchResultsLoaded {
        seq: u64,
        query: String,
        tracks: Vec<Track>,
    },
    SearchFailed {
        seq: u64,
        query: String,
        message: String,
    },
    AddTrack(Track),
    /// `uris` are the tracks that went into the saved playlist.
    PlaylistSaved {
        name: String,
        uris: Vec<String>,
    },
    Error(String),
}
