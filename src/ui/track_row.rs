use std::fmt;

use ratatui::widgets::Row;

use crate::model::Track;

/// One result row. Holds the track and the add handler it was built with;
/// [`TrackRow::add`] forwards the track to that handler untouched.
pub struct TrackRow<'a> {
    item: &'a Track,
    on_add: &'a dyn Fn(&Track),
}

impl<'a> TrackRow<'a> {
    pub fn new(item: &'a Track, on_add: &'a dyn Fn(&Track)) -> Self {
        Self { item, on_add }
    }

    pub fn key(&self) -> &'a str {
        &self.item.id
    }

    pub fn add(&self) {
        (self.on_add)(self.item);
    }

    pub fn to_row(&self, position: usize) -> Row<'a> {
        let title = if self.item.explicit {
            format!("{} [E]", self.item.name)
        } else {
            self.item.name.clone()
        };

        Row::new(vec![
            format!("{}", position + 1),
            title,
            self.item.artist_line(),
            self.item.album.clone(),
            self.item.duration_text(),
        ])
    }
}

impl PartialEq for TrackRow<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.item == other.item && std::ptr::addr_eq(self.on_add, other.on_add)
    }
}

impl fmt::Debug for TrackRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackRow")
            .field("key", &self.key())
            .field("item", &self.item)
            .finish_non_exhaustive()
    }
}
