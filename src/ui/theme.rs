//! Named style classes for the interface.
//!
//! Views never build colours inline; they ask the [`Theme`] for the style of a
//! [`StyleClass`], so the palette lives in one place. Users can recolour any
//! class by name from the `styles` table in the config file.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use tracing::warn;

use crate::ui::icons::ICON_COLOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    EmptyState,
    EmptyStateText,
    SectionTitle,
    TrackList,
    TrackListHeader,
    Selected,
    Border,
    ActiveBorder,
    Input,
    Hint,
}

impl StyleClass {
    pub const ALL: [StyleClass; 10] = [
        StyleClass::EmptyState,
        StyleClass::EmptyStateText,
        StyleClass::SectionTitle,
        StyleClass::TrackList,
        StyleClass::TrackListHeader,
        StyleClass::Selected,
        StyleClass::Border,
        StyleClass::ActiveBorder,
        StyleClass::Input,
        StyleClass::Hint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StyleClass::EmptyState => "empty-state",
            StyleClass::EmptyStateText => "empty-state-text",
            StyleClass::SectionTitle => "section-title",
            StyleClass::TrackList => "track-list",
            StyleClass::TrackListHeader => "track-list-header",
            StyleClass::Selected => "selected",
            StyleClass::Border => "border",
            StyleClass::ActiveBorder => "border-active",
            StyleClass::Input => "input",
            StyleClass::Hint => "hint",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.name() == name)
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub muted: Color,
    pub text: Color,
    pub heading: Color,
    pub border: Color,
    pub error: Color,
    overrides: HashMap<StyleClass, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Green,
            muted: ICON_COLOUR,
            text: Color::White,
            heading: Color::Yellow,
            border: Color::DarkGray,
            error: Color::Red,
            overrides: HashMap::new(),
        }
    }
}

impl Theme {
    /// Applies `class name -> colour` pairs on top of the default palette.
    /// Unknown classes and unparsable colours are logged and skipped.
    pub fn with_overrides(styles: &BTreeMap<String, String>) -> Self {
        let mut theme = Self::default();
        for (name, value) in styles {
            let Some(class) = StyleClass::from_name(name) else {
                warn!(class = %name, "unknown style class in config");
                continue;
            };
            match Color::from_str(value) {
                Ok(colour) => {
                    theme.overrides.insert(class, colour);
                }
                Err(_) => warn!(class = %name, %value, "invalid colour in config"),
            }
        }
        theme
    }

    pub fn style(&self, class: StyleClass) -> Style {
        let base = match class {
            StyleClass::EmptyState => Style::default().fg(self.border),
            StyleClass::EmptyStateText => Style::default().fg(Color::Gray),
            StyleClass::SectionTitle => Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD),
            StyleClass::TrackList => Style::default().fg(self.text),
            StyleClass::TrackListHeader => Style::default()
                .fg(self.heading)
                .add_modifier(Modifier::BOLD),
            StyleClass::Selected => Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD),
            StyleClass::Border => Style::default().fg(self.border),
            StyleClass::ActiveBorder => Style::default().fg(self.accent),
            StyleClass::Input => Style::default().fg(self.text),
            StyleClass::Hint => Style::default().fg(self.muted),
        };

        match self.overrides.get(&class) {
            Some(colour) => base.fg(*colour),
            None => base,
        }
    }
}
