mod edit;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode, ModeKind, Tab};

// Submodules reach each other's handlers through `use super::*;`
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use search::*;

/// Handle a key event in the current mode.
///
/// Checks run in a fixed order: tab switching (only while viewing), the
/// global quit, then the handler of the active mode, and finally the
/// active tab's own keys.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    if key.code == KeyCode::Tab && app.mode.is_viewing() {
        app.switch_tab();
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode.kind() {
        ModeKind::ShowingHelp => app.set_mode(Mode::Viewing),
        ModeKind::CollectingArgument => handle_argument(app, key),
        ModeKind::GoingToDate => handle_goto_date(app, key),
        ModeKind::SearchingTasks => handle_search(app, key),
        ModeKind::EditingScript => handle_script_edit(app, key),
        ModeKind::EditingTask => handle_task_edit(app, key),
        ModeKind::Viewing => match app.tab {
            Tab::Tasks => handle_task_view(app, key),
            Tab::Scripts => handle_script_view(app, key),
        },
    }
}

/// Handle a bracketed paste: the text goes into the active prompt as one
/// line. Outside a prompt it is dropped.
pub fn handle_paste(app: &mut App, text: &str) {
    let clean = text.replace(['\n', '\r'], " ");
    if app.mode.kind() == ModeKind::SearchingTasks {
        if app.search.insert_str(&clean) {
            app.task_pos.reset();
        }
    } else if let Some(input) = app.mode.input_mut() {
        input.insert_str(&clean);
    }
}
