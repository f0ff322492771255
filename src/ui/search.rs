use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, InputMode, Panel};
use crate::ui::results::{self, ResultsState, ResultsView};
use crate::ui::theme::{StyleClass, Theme};

pub fn render_input(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let editing = app.input_mode == InputMode::EditingSearch;
    let (border, hint) = if editing {
        (StyleClass::ActiveBorder, " Search (type, Enter to submit, Esc to leave) ")
    } else {
        (StyleClass::Border, " Search (press / to start) ")
    };

    let input = Paragraph::new(app.search_input.as_str())
        .style(theme.style(StyleClass::Input))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.style(border))
                .title(Line::from(vec![
                    Span::styled(" tracklist ", theme.style(StyleClass::SectionTitle)),
                    Span::styled(hint, theme.style(StyleClass::Hint)),
                ])),
        );
    f.render_widget(input, area);

    if editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let width = u16::try_from(app.search_input.width()).unwrap_or(u16::MAX);
        let x = (area.x + 1).saturating_add(width);
        f.set_cursor_position((x.min(max_x), area.y + 1));
    }
}

/// Fires the add action of the selected result row, if the results list is
/// what the panel currently shows.
pub fn add_selected(app: &App) -> bool {
    let on_add = app.add_track_handler();
    let view = ResultsView::new(
        Some(app.query.as_str()),
        &app.search_results,
        app.searching,
        &on_add,
    );
    let state = view.state();
    let ResultsState::Results(rows) = &state else {
        return false;
    };
    match rows.get(app.search_index) {
        Some(row) => {
            row.add();
            true
        }
        None => false,
    }
}

pub fn render_results(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let on_add = app.add_track_handler();
    let view = ResultsView::new(
        Some(app.query.as_str()),
        &app.search_results,
        app.searching,
        &on_add,
    );
    results::render(
        f,
        area,
        &view,
        app.search_index,
        app.active_panel == Panel::Results,
        theme,
    );
}
