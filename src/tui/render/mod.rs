pub mod help_overlay;
mod helpers;
pub mod list_view;
pub mod status_row;
pub mod tab_bar;
#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function: builds the view-model and hands it to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let vm = app.view_model();

    // Layout: tab bar (2 rows) | heading (2 rows) | list | footer | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, &vm, chunks[0]);
    list_view::render_heading(frame, app, &vm, chunks[1]);
    list_view::render_list(frame, app, &vm, chunks[2]);
    status_row::render_footer(frame, app, &vm, chunks[3]);
    status_row::render_status_row(frame, app, &vm, chunks[4]);

    // Help overlay (rendered on top of everything)
    if let Some(sections) = vm.help {
        help_overlay::render_help_overlay(frame, app, sections, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn full_frame_has_every_region() {
        let app = app_with_tasks(&["water plants", "call mom"]);
        let output = render_to_string(TERM_W, TERM_H, |frame, _area| {
            render(frame, &app);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("Tasks"));
        assert!(lines[0].contains("Scripts"));
        assert!(lines[2].contains("Sunday, 10 Mar 2024 (today)"));
        assert!(lines[4].contains("[ ] water plants"));
        assert!(lines[5].contains("[ ] call mom"));
        assert!(output.contains("Page 1 / 1"));
    }

    #[test]
    fn help_overlay_covers_the_list() {
        let mut app = app_with_tasks(&["water plants"]);
        app.set_mode(crate::tui::app::Mode::ShowingHelp);
        let output = render_to_string(TERM_W, TERM_H, |frame, _area| {
            render(frame, &app);
        });
        assert!(output.contains("Toggle complete"));
        assert!(output.contains("Press any key to return..."));
    }
}
