use chrono::{NaiveDate, TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::runner::RecordingLauncher;
use crate::io::storage::MemoryStore;
use crate::model::Task;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// The day every test app treats as today (a Sunday)
pub fn test_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

/// An app at 80x24 whose current day holds `titles` in that order and whose
/// script library is the built-in default.
pub fn app_with_tasks(titles: &[&str]) -> App {
    let tasks = titles
        .iter()
        .enumerate()
        .map(|(i, title)| Task::new(*title, Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap()))
        .collect();
    let store = MemoryStore::new().with_tasks(test_day(), tasks);
    let mut app = App::new(Box::new(store), Box::new(RecordingLauncher::new()), test_day());
    app.resize(TERM_W, TERM_H);
    app
}
