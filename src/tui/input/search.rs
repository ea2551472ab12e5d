use chrono::NaiveDate;

use super::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Live search: every keystroke refilters and returns to the first row
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.task_pos.reset();
            app.set_mode(Mode::Viewing);
        }
        KeyCode::Esc => {
            app.search.clear();
            app.task_pos.reset();
            app.set_mode(Mode::Viewing);
        }
        _ => {
            app.search.handle_key(&key);
            app.task_pos.reset();
        }
    }
}

/// Date prompt. An unparseable date leaves the current day in place.
pub(super) fn handle_goto_date(app: &mut App, key: KeyEvent) {
    let Mode::GoingToDate { mut input } = std::mem::replace(&mut app.mode, Mode::Viewing) else {
        return;
    };
    match key.code {
        KeyCode::Esc => {}
        KeyCode::Enter => {
            let text = input.value().trim();
            if text.is_empty() {
                return;
            }
            match NaiveDate::parse_from_str(text, DATE_FORMAT) {
                Ok(date) => app.load_day(date),
                Err(_) => app.error(format!("invalid date: {}", text)),
            }
        }
        _ => {
            input.handle_key(&key);
            app.mode = Mode::GoingToDate { input };
        }
    }
}
