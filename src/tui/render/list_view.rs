use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Tab};
use crate::tui::view_model::{Row, ViewModel};
use crate::util::unicode;

use super::helpers::{padding, spans_width};

/// Date or library title, followed by a blank spacer line
pub fn render_heading(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect) {
    let style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    let heading = unicode::truncate_to_width(&vm.heading, (area.width as usize).saturating_sub(1));
    let widget = Paragraph::new(Line::from(Span::styled(format!(" {}", heading), style)))
        .style(Style::default().bg(app.theme.background));
    frame.render_widget(widget, area);
}

/// The current page of rows, with the cursor row highlighted
pub fn render_list(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    if vm.rows.is_empty() {
        let text = match (vm.tab, &vm.filter) {
            (Tab::Tasks, Some(query)) => format!(" No tasks match \"{}\"", query),
            (Tab::Tasks, None) => " No tasks for this day. Press n to add one.".to_string(),
            (Tab::Scripts, _) => " No scripts yet. Press n to add one.".to_string(),
        };
        let widget = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        frame.render_widget(widget, area);
        return;
    }

    let lines: Vec<Line> = vm
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let selected = vm.cursor == Some(i);
            let mut spans = match row {
                Row::Task {
                    title,
                    completed,
                    overdue,
                } => task_spans(app, title, *completed, *overdue, width),
                Row::Script { name, description } => script_spans(app, name, description, width),
            };
            if selected {
                let used = spans_width(&spans);
                spans.push(Span::raw(padding(width, used)));
                let highlight = Style::default().fg(app.theme.on_accent).bg(app.theme.accent);
                for span in &mut spans {
                    span.style = span.style.patch(highlight);
                }
            }
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(widget, area);
}

fn task_spans<'a>(
    app: &App,
    title: &str,
    completed: bool,
    overdue: bool,
    width: usize,
) -> Vec<Span<'a>> {
    let checkbox = if completed { " [x] " } else { " [ ] " };
    let title_style = if completed {
        Style::default()
            .fg(app.theme.dim)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if overdue {
        Style::default().fg(app.theme.red)
    } else {
        Style::default().fg(app.theme.text)
    };
    let box_style = if completed {
        Style::default().fg(app.theme.green)
    } else {
        Style::default().fg(app.theme.dim)
    };
    let room = width.saturating_sub(checkbox.len());
    vec![
        Span::styled(checkbox, box_style),
        Span::styled(unicode::truncate_to_width(title, room), title_style),
    ]
}

fn script_spans<'a>(app: &App, name: &str, description: &str, width: usize) -> Vec<Span<'a>> {
    let name_text = format!(" {}", unicode::truncate_to_width(name, width.saturating_sub(1)));
    let mut spans = vec![Span::styled(
        name_text,
        Style::default()
            .fg(app.theme.text_bright)
            .add_modifier(Modifier::BOLD),
    )];
    let used = spans_width(&spans);
    if !description.is_empty() && used + 4 < width {
        spans.push(Span::styled(
            format!("  {}", unicode::truncate_to_width(description, width - used - 2)),
            Style::default().fg(app.theme.dim),
        ));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Script;
    use crate::tui::render::test_helpers::*;

    fn draw_list(app: &App, w: u16, h: u16) -> String {
        let vm = app.view_model();
        render_to_string(w, h, |frame, area| render_list(frame, app, &vm, area))
    }

    #[test]
    fn task_rows_with_checkboxes() {
        let mut app = app_with_tasks(&["water plants", "call mom"]);
        app.tasks[1].completed = true;
        let output = draw_list(&app, 30, 3);
        assert_eq!(output, " [ ] water plants\n [x] call mom");
    }

    #[test]
    fn long_titles_are_truncated() {
        let app = app_with_tasks(&["a very long task title that will not fit"]);
        let output = draw_list(&app, 20, 1);
        assert_eq!(output, " [ ] a very long ta\u{2026}");
    }

    #[test]
    fn empty_day_message() {
        let app = app_with_tasks(&[]);
        let output = draw_list(&app, 60, 2);
        assert_eq!(output, " No tasks for this day. Press n to add one.");
    }

    #[test]
    fn empty_search_result_message() {
        let mut app = app_with_tasks(&["a"]);
        app.search.set_value("zzz");
        let output = draw_list(&app, 60, 2);
        assert_eq!(output, " No tasks match \"zzz\"");
    }

    #[test]
    fn script_rows_show_description() {
        let mut app = app_with_tasks(&[]);
        app.scripts.push(Script::new("deploy", "make deploy", ""));
        app.switch_tab();
        let output = draw_list(&app, 50, 3);
        assert_eq!(output, " hello-world  prints hello world\n deploy");
    }

    #[test]
    fn heading_is_the_day() {
        let app = app_with_tasks(&[]);
        let vm = app.view_model();
        let output = render_to_string(40, 2, |frame, area| render_heading(frame, &app, &vm, area));
        assert_eq!(output, " Sunday, 10 Mar 2024 (today)");
    }
}
