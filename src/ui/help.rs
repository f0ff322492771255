use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::ui::theme::{StyleClass, Theme};

const BINDINGS: &[(&str, &str)] = &[
    ("q", "Quit"),
    ("/", "Edit search"),
    ("Enter (search)", "Search now"),
    ("Esc", "Leave search / Close help"),
    ("j / ↓", "Move down"),
    ("k / ↑", "Move up"),
    ("Tab", "Switch results / playlist"),
    ("Enter / a", "Add track to playlist"),
    ("d / Delete", "Remove from playlist"),
    ("r", "Rename playlist"),
    ("S", "Save playlist to Spotify"),
    ("?", "Toggle help"),
];

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.area();

    let popup_width = 52u16.min(area.width.saturating_sub(4));
    let popup_height = (BINDINGS.len() as u16 + 2).min(area.height.saturating_sub(2));

    let popup_area = Rect {
        x: (area.width.saturating_sub(popup_width)) / 2,
        y: (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    f.render_widget(Clear, popup_area);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:>16}", key), theme.style(StyleClass::Selected)),
                Span::raw("  "),
                Span::styled(*desc, theme.style(StyleClass::TrackList)),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.style(StyleClass::ActiveBorder))
            .title(" Keybindings (? to close) "),
    );

    f.render_widget(help, popup_area);
}
