use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Flash, FlashKind, InputMode};
use crate::ui::theme::{StyleClass, Theme};

pub fn main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(8),    // Body
            Constraint::Length(1), // Footer (key hints)
        ])
        .split(area)
        .to_vec()
}

pub fn body_split(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Results
            Constraint::Percentage(40), // Playlist
        ])
        .split(area)
        .to_vec()
}

pub fn render_footer(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let hints: &[(&str, &str)] = match app.input_mode {
        InputMode::EditingSearch => &[("Enter", "search"), ("Esc", "done")],
        InputMode::EditingName => &[("Enter", "keep name"), ("Esc", "undo")],
        InputMode::Normal => &[
            ("/", "search"),
            ("a", "add"),
            ("Tab", "switch"),
            ("d", "remove"),
            ("r", "rename"),
            ("S", "save"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {} ", key), theme.style(StyleClass::Selected)));
        spans.push(Span::styled(format!("{} ", desc), theme.style(StyleClass::Hint)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_flash(f: &mut Frame, flash: &Flash, theme: &Theme) {
    let area = f.area();
    let popup_width = (flash.message.width() as u16 + 4).min(area.width.saturating_sub(4));
    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(5) / 2,
        width: popup_width,
        height: 3.min(area.height),
    };

    let (style, title) = match flash.kind {
        FlashKind::Info => (theme.style(StyleClass::ActiveBorder), " Done "),
        FlashKind::Error => (ratatui::style::Style::default().fg(theme.error), " Error "),
    };

    f.render_widget(Clear, popup_area);
    let paragraph = Paragraph::new(flash.message.as_str()).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(title),
    );
    f.render_widget(paragraph, popup_area);
}
