//! What to draw for one frame, independent of layout and colors.

use crate::ops::view;
use crate::tui::app::{App, Mode, ModeKind, StatusMessage, Tab, TaskEdit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub tab: Tab,
    pub mode: ModeKind,
    /// Line above the list: the selected day, or the library title
    pub heading: String,
    pub rows: Vec<Row>,
    /// Selected row within `rows`; only shown while viewing
    pub cursor: Option<usize>,
    pub footer: Footer,
    pub status: Option<StatusMessage>,
    /// Active task search, shown when not being typed
    pub filter: Option<String>,
    pub help: Option<&'static [HelpSection]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Task {
        title: String,
        completed: bool,
        overdue: bool,
    },
    Script {
        name: String,
        description: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Footer {
    Page {
        current: usize,
        total: usize,
        hints: &'static str,
    },
    Prompt {
        label: String,
        value: String,
        placeholder: &'static str,
        /// Cell column of the text cursor within `value`
        cursor: usize,
    },
    Hint(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: &'static [(&'static str, &'static str)],
}

pub const TASK_HINTS: &str = "/: search • ?: help • Tab: switch";
pub const SCRIPT_HINTS: &str = "Enter: run • n: new • e: edit • d: delete • Tab: switch";
pub const HELP_RETURN: &str = "Press any key to return...";

pub const TASK_HELP: &[HelpSection] = &[
    HelpSection {
        title: "Navigation",
        bindings: &[
            ("\u{2191}\u{2193}/jk", "Move cursor up/down"),
            ("\u{2190}\u{2192}/hl", "Previous / next day"),
            ("t", "Jump to today"),
            ("g", "Go to date"),
        ],
    },
    HelpSection {
        title: "Tasks",
        bindings: &[
            ("n", "New task"),
            ("e", "Edit task"),
            ("Space", "Toggle complete"),
            ("d", "Delete task"),
            ("/", "Search"),
            ("Esc", "Clear search"),
        ],
    },
    GLOBAL_HELP,
];

pub const SCRIPT_HELP: &[HelpSection] = &[
    HelpSection {
        title: "Scripts",
        bindings: &[
            ("\u{2191}\u{2193}/jk", "Move cursor up/down"),
            ("Enter", "Run script"),
            ("n", "New script"),
            ("e", "Edit script"),
            ("d", "Delete script"),
        ],
    },
    GLOBAL_HELP,
];

const GLOBAL_HELP: HelpSection = HelpSection {
    title: "Global",
    bindings: &[
        ("Tab", "Switch tab"),
        ("?", "Toggle this help"),
        ("q", "Quit"),
        ("Ctrl+C", "Quit from anywhere"),
    ],
};

pub fn build(app: &App) -> ViewModel {
    let ps = app.page_size();
    let (rows, pos, total) = match app.tab {
        Tab::Tasks => {
            let filtered = app.filtered_tasks();
            let (page, total) = view::paginate(&filtered, ps, app.task_pos.page);
            let rows = page
                .iter()
                .map(|t| Row::Task {
                    title: t.title.clone(),
                    completed: t.completed,
                    overdue: app.is_overdue(t),
                })
                .collect::<Vec<_>>();
            (rows, app.task_pos, total)
        }
        Tab::Scripts => {
            let (page, total) = view::paginate(&app.scripts, ps, app.script_pos.page);
            let rows = page
                .iter()
                .map(|s| Row::Script {
                    name: s.name.clone(),
                    description: s.description.clone(),
                })
                .collect::<Vec<_>>();
            (rows, app.script_pos, total)
        }
    };

    let cursor = (app.mode.is_viewing() && !rows.is_empty()).then_some(pos.cursor);
    let heading = match app.tab {
        Tab::Tasks => {
            let mut heading = app.selected_date.format("%A, %d %b %Y").to_string();
            if app.selected_date == app.today {
                heading.push_str(" (today)");
            }
            heading
        }
        Tab::Scripts => format!("Script library ({})", app.scripts.len()),
    };

    let hints = match (app.show_key_hints, app.tab) {
        (false, _) => "",
        (true, Tab::Tasks) => TASK_HINTS,
        (true, Tab::Scripts) => SCRIPT_HINTS,
    };
    let footer = match prompt_label(&app.mode) {
        Some(label) => match app.prompt() {
            Some(input) => Footer::Prompt {
                label,
                value: input.value().to_string(),
                placeholder: input.placeholder(),
                cursor: input.cursor_col(),
            },
            None => Footer::Hint(""),
        },
        None if app.mode.kind() == ModeKind::ShowingHelp => Footer::Hint(HELP_RETURN),
        None => Footer::Page {
            current: pos.page + 1,
            total,
            hints,
        },
    };

    let filter = match (app.tab, app.mode.kind()) {
        (Tab::Tasks, ModeKind::Viewing) => app.query().map(str::to_string),
        _ => None,
    };
    let help = (app.mode.kind() == ModeKind::ShowingHelp).then_some(match app.tab {
        Tab::Tasks => TASK_HELP,
        Tab::Scripts => SCRIPT_HELP,
    });

    ViewModel {
        tab: app.tab,
        mode: app.mode.kind(),
        heading,
        rows,
        cursor,
        footer,
        status: app.status.clone(),
        filter,
        help,
    }
}

/// Footer label for modes that show a text prompt
fn prompt_label(mode: &Mode) -> Option<String> {
    let label = match mode {
        Mode::EditingTask {
            target: TaskEdit::New,
            ..
        } => "NEW".to_string(),
        Mode::EditingTask { .. } => "EDIT".to_string(),
        Mode::SearchingTasks => "SEARCH".to_string(),
        Mode::GoingToDate { .. } => "GO TO DATE".to_string(),
        Mode::EditingScript { draft, .. } => draft.step().label().to_string(),
        Mode::CollectingArgument { run, .. } => {
            format!("ENTER {}", run.current().unwrap_or_default())
        }
        Mode::Viewing | Mode::ShowingHelp => return None,
    };
    Some(label)
}
