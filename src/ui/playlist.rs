use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::app::{App, InputMode, Panel};
use crate::model::format_duration;
use crate::ui::theme::{StyleClass, Theme};

pub fn render(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let is_active = app.active_panel == Panel::Playlist;
    let border_style = if is_active || app.input_mode == InputMode::EditingName {
        theme.style(StyleClass::ActiveBorder)
    } else {
        theme.style(StyleClass::Border)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title(app, theme))
        .title_bottom(
            Line::from(Span::styled(
                format!(
                    " {} tracks · {} ",
                    app.playlist_tracks.len(),
                    format_duration(app.playlist_duration_ms())
                ),
                theme.style(StyleClass::Hint),
            ))
            .alignment(Alignment::Right),
        );

    if app.playlist_tracks.is_empty() {
        let empty = Paragraph::new("Add tracks from the results with Enter or a")
            .style(theme.style(StyleClass::EmptyStateText))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = app
        .playlist_tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            Row::new(vec![
                format!("{}", i + 1),
                track.name.clone(),
                track.artist_line(),
                track.duration_text(),
            ])
        })
        .collect();

    let highlight = if is_active {
        theme.style(StyleClass::Selected)
    } else {
        Style::default()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(50),
            Constraint::Percentage(35),
            Constraint::Length(6),
        ],
    )
    .style(theme.style(StyleClass::TrackList))
    .block(block)
    .row_highlight_style(highlight);

    let mut state = TableState::default();
    state.select(Some(app.playlist_index));
    f.render_stateful_widget(table, area, &mut state);
}

fn title<'a>(app: &'a App, theme: &Theme) -> Line<'a> {
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(app.playlist_name.as_str(), theme.style(StyleClass::SectionTitle)),
    ];
    if app.input_mode == InputMode::EditingName {
        spans.push(Span::styled("▏ (Enter to keep, Esc to undo) ", theme.style(StyleClass::Hint)));
    } else if app.saving {
        spans.push(Span::styled(" saving… ", theme.style(StyleClass::Hint)));
    } else {
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
