use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, StatusLevel};
use crate::tui::view_model::{Footer, ViewModel};
use crate::util::unicode;

use super::helpers::{padding, spans_width};

/// Render the footer: page indicator, an input prompt, or a hint
pub fn render_footer(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match &vm.footer {
        Footer::Page {
            current,
            total,
            hints,
        } => {
            let page = format!("Page {} / {}", current, total);
            let text = if hints.is_empty() {
                format!(" {}", page)
            } else {
                format!(" {} \u{2022} {}", hints, page)
            };
            Line::from(Span::styled(
                unicode::truncate_to_width(&text, width),
                Style::default().fg(app.theme.footer).bg(bg),
            ))
        }
        Footer::Prompt {
            label,
            value,
            placeholder,
            cursor,
        } => {
            let label_span = Span::styled(
                format!(" {}: ", label),
                Style::default()
                    .fg(app.theme.accent)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            );
            let prefix = spans_width(std::slice::from_ref(&label_span));
            let body = if value.is_empty() {
                Span::styled(*placeholder, Style::default().fg(app.theme.dim).bg(bg))
            } else {
                Span::styled(
                    value.clone(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                )
            };
            let x = area.x as usize + (prefix + cursor).min(width.saturating_sub(1));
            frame.set_cursor_position(Position::new(x as u16, area.y));
            Line::from(vec![label_span, body])
        }
        Footer::Hint(hint) => Line::from(Span::styled(
            format!(" {}", hint),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Render the status row (bottom of screen): the last message, or a reminder
/// that a search filter is active
pub fn render_status_row(frame: &mut Frame, app: &App, vm: &ViewModel, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(status) = &vm.status {
        let color = match status.level {
            StatusLevel::Info => app.theme.green,
            StatusLevel::Error => app.theme.red,
        };
        Line::from(Span::styled(
            unicode::truncate_to_width(&format!(" {}", status.text), width),
            Style::default().fg(color).bg(bg),
        ))
    } else if let Some(query) = &vm.filter {
        let mut spans = vec![Span::styled(
            format!(" /{}", query),
            Style::default().fg(app.theme.dim).bg(bg),
        )];
        let hint = "Esc clear";
        let content_width = spans_width(&spans);
        if content_width + hint.len() < width {
            spans.push(Span::styled(
                padding(width, content_width + hint.len()),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
        Line::from(spans)
    } else {
        Line::from(Span::styled(padding(width, 0), Style::default().bg(bg)))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn draw_footer(app: &App, w: u16) -> String {
        let vm = app.view_model();
        render_to_string(w, 1, |frame, area| render_footer(frame, app, &vm, area))
    }

    fn draw_status(app: &App, w: u16) -> String {
        let vm = app.view_model();
        render_to_string(w, 1, |frame, area| render_status_row(frame, app, &vm, area))
    }

    fn press(app: &mut App, code: KeyCode) {
        crate::tui::input::handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn page_indicator_with_hints() {
        let app = app_with_tasks(&["a"]);
        assert_eq!(
            draw_footer(&app, 60),
            " /: search \u{2022} ?: help \u{2022} Tab: switch \u{2022} Page 1 / 1"
        );
    }

    #[test]
    fn prompt_shows_placeholder_until_typed() {
        let mut app = app_with_tasks(&[]);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(draw_footer(&app, 40), " GO TO DATE: YYYY-MM-DD");
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(draw_footer(&app, 40), " GO TO DATE: 2");
    }

    #[test]
    fn search_prompt_and_filter_reminder() {
        let mut app = app_with_tasks(&["fix bug"]);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(draw_footer(&app, 40), " SEARCH: b");
        press(&mut app, KeyCode::Enter);
        let status = draw_status(&app, 30);
        assert!(status.starts_with(" /b"));
        assert!(status.ends_with("Esc clear"));
    }

    #[test]
    fn error_status_line() {
        let mut app = app_with_tasks(&[]);
        app.error("could not write tasks");
        assert_eq!(draw_status(&app, 40), " could not write tasks");
    }
}
