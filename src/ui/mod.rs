pub mod help;
pub mod icons;
pub mod layout;
pub mod playlist;
pub mod results;
pub mod search;
pub mod theme;
pub mod track_row;

use ratatui::Frame;

use crate::app::App;
use crate::ui::theme::Theme;

pub fn render(f: &mut Frame, app: &App, theme: &Theme) {
    let chunks = layout::main_layout(f.area());

    // Header (search input)
    search::render_input(f, app, chunks[0], theme);

    // Body (results | playlist)
    let body = layout::body_split(chunks[1]);
    search::render_results(f, app, body[0], theme);
    playlist::render(f, app, body[1], theme);

    // Footer (key hints)
    layout::render_footer(f, app, chunks[2], theme);

    if let Some(ref flash) = app.flash {
        layout::render_flash(f, flash, theme);
    }

    if app.show_help {
        help::render(f, theme);
    }
}
