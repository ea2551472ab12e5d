use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::view_model::{HELP_RETURN, HelpSection};

/// Render the help overlay for the active tab (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, sections: &[HelpSection], area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    for section in sections {
        lines.push(Line::from(Span::styled(
            format!(" {}", section.title),
            header_style,
        )));
        for (key, desc) in section.bindings {
            add_binding(&mut lines, key, desc, key_style, desc_style);
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!(" {}", HELP_RETURN),
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 12;
    let padded_key = format!(" {:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use crate::tui::view_model::{SCRIPT_HELP, TASK_HELP};

    #[test]
    fn task_help_lists_task_keys() {
        let app = app_with_tasks(&[]);
        let output = render_to_string(TERM_W, 40, |frame, area| {
            render_help_overlay(frame, &app, TASK_HELP, area);
        });
        assert!(output.contains("Key Bindings"));
        assert!(output.contains("Go to date"));
        assert!(output.contains("Ctrl+C"));
        assert!(!output.contains("Run script"));
    }

    #[test]
    fn script_help_lists_script_keys() {
        let app = app_with_tasks(&[]);
        let output = render_to_string(TERM_W, 40, |frame, area| {
            render_help_overlay(frame, &app, SCRIPT_HELP, area);
        });
        assert!(output.contains("Run script"));
        assert!(!output.contains("Toggle complete"));
    }

    #[test]
    fn centered_rect_is_inside_parent() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(60, 80, area);
        assert_eq!(r.width, 60);
        assert_eq!(r.height, 40);
        assert!(r.x >= 20 && r.y >= 5);
    }
}
