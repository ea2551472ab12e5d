use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Tab};
use crate::tui::view_model::ViewModel;
use crate::util::unicode;

use super::helpers::{padding, spans_width};

/// Render the tab bar: one tab per list, with a separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect) {
    // Split into tab row and separator row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, vm, chunks[0]);
    render_separator(frame, app, vm, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect) -> Vec<usize> {
    let bg_style = Style::default().bg(app.theme.background);
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(app.theme.background));

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "\u{25B6}",
            Style::default().fg(app.theme.accent).bg(app.theme.background),
        ),
        Span::styled(" ", bg_style),
    ];
    let mut sep_cols: Vec<usize> = Vec::new();

    for tab in [Tab::Tasks, Tab::Scripts] {
        let label = match tab {
            Tab::Tasks => format!(" {} ", tab.title()),
            Tab::Scripts => format!(" {} {} ", tab.title(), app.scripts.len()),
        };
        spans.push(Span::styled(label, tab_style(app, vm.tab == tab)));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    let tabs = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(tabs, area);
    sep_cols
}

/// Horizontal rule with junctions under the tab separators. An active task
/// search is shown at its right end.
fn render_separator(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let bg = app.theme.background;
    let rule_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut indicator: Vec<Span> = Vec::new();
    if let Some(query) = &vm.filter {
        indicator.push(Span::styled("search: ", Style::default().fg(app.theme.accent).bg(bg)));
        let room = width.saturating_sub(12);
        indicator.push(Span::styled(
            unicode::truncate_to_width(query, room),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }

    // +2: one space before the indicator, one after
    let rule_end = if indicator.is_empty() {
        width
    } else {
        width.saturating_sub(spans_width(&indicator) + 2)
    };
    let rule: String = (0..rule_end)
        .map(|col| if sep_cols.contains(&col) { '\u{2534}' } else { '\u{2500}' })
        .collect();

    let mut spans = vec![Span::styled(rule, rule_style)];
    if !indicator.is_empty() {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        spans.extend(indicator);
        let used = spans_width(&spans);
        spans.push(Span::styled(padding(width, used), Style::default().bg(bg)));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.on_accent)
            .bg(app.theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn tabs_with_junctions() {
        let app = app_with_tasks(&[]);
        let vm = app.view_model();
        let output = render_to_string(40, 2, |frame, area| {
            render_tab_bar(frame, &app, &vm, area);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], " \u{25B6}  Tasks \u{2502} Scripts 1 \u{2502}");
        assert_eq!(
            lines[1].chars().position(|c| c == '\u{2534}'),
            Some(10)
        );
    }

    #[test]
    fn active_search_shown_on_rule() {
        let mut app = app_with_tasks(&["fix bug"]);
        app.search.set_value("bug");
        let vm = app.view_model();
        let output = render_to_string(40, 2, |frame, area| {
            render_tab_bar(frame, &app, &vm, area);
        });
        assert!(output.lines().nth(1).unwrap().ends_with("search: bug"));
    }
}
