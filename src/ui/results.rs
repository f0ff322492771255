//! The search results panel.
//!
//! [`ResultsView`] picks exactly one of four states from the current query,
//! the results list and the loading flag:
//!
//! 1. no query: a prompt to start searching
//! 2. a search is in flight: "Searching..."
//! 3. the search came back empty: a "no results" message naming the query
//! 4. otherwise: the titled track list, one [`TrackRow`] per result
//!
//! The checks run in that order and the first match wins. The view keeps no
//! state between renders; callers own every input and must pass a plain query
//! string and a results slice.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::model::Track;
use crate::ui::icons::Glyph;
use crate::ui::theme::{StyleClass, Theme};
use crate::ui::track_row::TrackRow;

pub const PROMPT_TEXT: &str = "Log in to Spotify and start searching";
pub const SEARCHING_TEXT: &str = "Searching...";
pub const RESULTS_TITLE: &str = "Search Results";
// An expired login and a real miss look the same from here, so the hint is
// always shown.
pub const LOGIN_HINT: &str = "Are you logged in to Spotify?";

pub fn no_results_text(query: &str) -> String {
    format!("No results found for \"{}\".", query)
}

#[derive(Debug, PartialEq)]
pub enum ResultsState<'a> {
    Prompt,
    Searching,
    NoResults { query: &'a str },
    Results(Vec<TrackRow<'a>>),
}

/// Icon and text for the three non-list states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub glyph: Glyph,
    pub lines: Vec<String>,
}

impl ResultsState<'_> {
    pub fn empty_state(&self) -> Option<EmptyState> {
        let (glyph, lines) = match self {
            ResultsState::Prompt => (Glyph::Search, vec![PROMPT_TEXT.to_string()]),
            ResultsState::Searching => (Glyph::Search, vec![SEARCHING_TEXT.to_string()]),
            ResultsState::NoResults { query } => (
                Glyph::Music,
                vec![no_results_text(query), LOGIN_HINT.to_string()],
            ),
            ResultsState::Results(_) => return None,
        };
        Some(EmptyState { glyph, lines })
    }
}

pub struct ResultsView<'a> {
    query: Option<&'a str>,
    results: &'a [Track],
    searching: bool,
    on_add: &'a dyn Fn(&Track),
}

impl<'a> ResultsView<'a> {
    pub fn new(
        query: Option<&'a str>,
        results: &'a [Track],
        searching: bool,
        on_add: &'a dyn Fn(&Track),
    ) -> Self {
        Self {
            query,
            results,
            searching,
            on_add,
        }
    }

    pub fn state(&self) -> ResultsState<'a> {
        match self.query {
            None | Some("") => ResultsState::Prompt,
            Some(_) if self.searching => ResultsState::Searching,
            Some(query) if self.results.is_empty() => ResultsState::NoResults { query },
            Some(_) => ResultsState::Results(
                self.results
                    .iter()
                    .map(|item| TrackRow::new(item, self.on_add))
                    .collect(),
            ),
        }
    }
}

pub fn render(
    f: &mut Frame,
    area: Rect,
    view: &ResultsView,
    selected: usize,
    active: bool,
    theme: &Theme,
) {
    let border_style = if active {
        theme.style(StyleClass::ActiveBorder)
    } else {
        theme.style(StyleClass::Border)
    };

    match view.state() {
        ResultsState::Results(rows) => {
            render_rows(f, area, &rows, selected, active, border_style, theme)
        }
        state => {
            if let Some(empty) = state.empty_state() {
                render_empty(f, area, &empty, border_style, theme);
            }
        }
    }
}

fn render_empty(f: &mut Frame, area: Rect, empty: &EmptyState, border_style: Style, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Results ")
        .style(theme.style(StyleClass::EmptyState));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(empty.glyph.rows()),
            Constraint::Length(empty.lines.len() as u16),
            Constraint::Fill(1),
        ])
        .split(inner);

    // Glyph sits on the middle row of its reserved space.
    let icon_area = chunks[1];
    let icon_row = Rect {
        y: icon_area.y + icon_area.height / 2,
        height: icon_area.height.min(1),
        ..icon_area
    };
    let icon = Paragraph::new(empty.glyph.symbol())
        .style(Style::default().fg(empty.glyph.colour()))
        .alignment(Alignment::Center);
    f.render_widget(icon, icon_row);

    let lines: Vec<Line> = empty.lines.iter().map(|l| Line::from(l.as_str())).collect();
    let text = Paragraph::new(lines)
        .style(theme.style(StyleClass::EmptyStateText))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(text, chunks[2]);
}

fn render_rows(
    f: &mut Frame,
    area: Rect,
    rows: &[TrackRow],
    selected: usize,
    active: bool,
    border_style: Style,
    theme: &Theme,
) {
    let header = Row::new(vec!["#", "Title", "Artist", "Album", "Time"])
        .style(theme.style(StyleClass::TrackListHeader))
        .bottom_margin(1);

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| row.to_row(i))
        .collect();

    let highlight = if active {
        theme.style(StyleClass::Selected)
    } else {
        Style::default()
    };

    let table = Table::new(
        table_rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .style(theme.style(StyleClass::TrackList))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                format!(" {} ", RESULTS_TITLE),
                theme.style(StyleClass::SectionTitle),
            )),
    )
    .row_highlight_style(highlight);

    let mut state = TableState::default();
    state.select(Some(selected.min(rows.len().saturating_sub(1))));
    f.render_stateful_widget(table, area, &mut state);
}
