use rspotify::model::FullTrack;
use rspotify::prelude::*;

/// A single search hit, flattened out of the Spotify catalogue model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub duration_ms: i64,
    pub explicit: bool,
}

impl Track {
    /// Local files carry no catalogue id and cannot be added to a playlist,
    /// so they are dropped here.
    pub fn from_full(track: FullTrack) -> Option<Self> {
        let id = track.id?;
        Some(Self {
            id: id.id().to_string(),
            uri: id.uri(),
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album: track.album.name,
            duration_ms: track.duration.num_milliseconds(),
            explicit: track.explicit,
        })
    }

    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }

    pub fn duration_text(&self) -> String {
        format_duration(self.duration_ms)
    }
}

pub fn format_duration(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{}:{:02}", mins, secs)
}

#[cfg(test)]
pub(crate) fn track(id: &str, name: &str) -> Track {
    Track {
        id: id.to_string(),
        uri: format!("spotify:track:{}", id),
        name: name.to_string(),
        artists: vec!["Test Artist".to_string()],
        album: "Test Album".to_string(),
        duration_ms: 185_000,
        explicit: false,
    }
}
