use std::error::Error;
use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::io::runner::{Launcher, ShellLauncher};
use crate::io::storage::{FileStore, Store};
use crate::model::{Config, Script, Task, TaskKey};
use crate::ops::script_ops::{ScriptDraft, ScriptRun};
use crate::ops::task_ops;
use crate::ops::view::{self, PagePos};

use super::input;
use super::render;
use super::text_input::TextInput;
use super::theme::Theme;

/// Rows taken by everything except the list: tab bar and separator, date
/// header and spacer, footer, status row.
pub const CHROME_ROWS: u16 = 6;

/// Longest accepted date entry, `YYYY-MM-DD`
pub const DATE_INPUT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Tasks,
    Scripts,
}

impl Tab {
    pub fn other(self) -> Tab {
        match self {
            Tab::Tasks => Tab::Scripts,
            Tab::Scripts => Tab::Tasks,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Tasks => "Tasks",
            Tab::Scripts => "Scripts",
        }
    }
}

/// What a task prompt will do on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEdit {
    New,
    /// Rename the task shown when the prompt opened
    Existing(TaskKey),
}

/// Current interaction mode. Each variant owns the scratch state that only
/// makes sense while it is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    EditingTask { target: TaskEdit, input: TextInput },
    /// The query itself lives on [`App::search`] since it outlives the mode
    SearchingTasks,
    GoingToDate { input: TextInput },
    ShowingHelp,
    EditingScript { draft: ScriptDraft, input: TextInput },
    CollectingArgument { run: ScriptRun, input: TextInput },
}

/// Field-less mirror of [`Mode`] for the render-model and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Viewing,
    EditingTask,
    SearchingTasks,
    GoingToDate,
    ShowingHelp,
    EditingScript,
    CollectingArgument,
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Viewing => ModeKind::Viewing,
            Mode::EditingTask { .. } => ModeKind::EditingTask,
            Mode::SearchingTasks => ModeKind::SearchingTasks,
            Mode::GoingToDate { .. } => ModeKind::GoingToDate,
            Mode::ShowingHelp => ModeKind::ShowingHelp,
            Mode::EditingScript { .. } => ModeKind::EditingScript,
            Mode::CollectingArgument { .. } => ModeKind::CollectingArgument,
        }
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, Mode::Viewing)
    }

    /// The text-entry widget of the active prompt, if the mode has one
    pub fn input_mut(&mut self) -> Option<&mut TextInput> {
        match self {
            Mode::EditingTask { input, .. }
            | Mode::GoingToDate { input }
            | Mode::EditingScript { input, .. }
            | Mode::CollectingArgument { input, .. } => Some(input),
            Mode::Viewing | Mode::SearchingTasks | Mode::ShowingHelp => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-line message shown under the footer until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// Main application state
pub struct App {
    pub tab: Tab,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Local calendar day the app considers "today"
    pub today: NaiveDate,
    pub selected_date: NaiveDate,
    /// Tasks of `selected_date`, always sorted
    pub tasks: Vec<Task>,
    pub scripts: Vec<Script>,
    /// Position within the filtered task list
    pub task_pos: PagePos,
    pub script_pos: PagePos,
    /// Search query; filters the task list whenever it is non-empty
    pub search: TextInput,
    pub status: Option<StatusMessage>,
    pub width: u16,
    pub height: u16,
    store: Box<dyn Store>,
    launcher: Box<dyn Launcher>,
}

impl App {
    pub fn new(store: Box<dyn Store>, launcher: Box<dyn Launcher>, today: NaiveDate) -> Self {
        let mut app = App {
            tab: Tab::Tasks,
            mode: Mode::Viewing,
            should_quit: false,
            theme: Theme::default(),
            show_key_hints: true,
            today,
            selected_date: today,
            tasks: Vec::new(),
            scripts: Vec::new(),
            task_pos: PagePos::default(),
            script_pos: PagePos::default(),
            search: TextInput::new("Search tasks..."),
            status: None,
            width: 80,
            height: 24,
            store,
            launcher,
        };
        app.load_day(today);
        app.load_scripts();
        app
    }

    // -----------------------------------------------------------------------
    // Derived view state
    // -----------------------------------------------------------------------

    pub fn page_size(&self) -> usize {
        view::page_size(self.height, CHROME_ROWS)
    }

    /// The active search query, if it filters anything
    pub fn query(&self) -> Option<&str> {
        Some(self.search.value()).filter(|q| !q.is_empty())
    }

    /// Tasks that pass the search filter, in display order
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        let query = self.query();
        view::filter(
            &self.tasks,
            query.map(|q| move |t: &Task| task_ops::matches_query(t, q)),
        )
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let idx = self.task_pos.index(self.page_size());
        self.filtered_tasks().get(idx).copied()
    }

    /// Library index of the selected script, derived from page and cursor now
    pub fn selected_script_index(&self) -> Option<usize> {
        let idx = self.script_pos.index(self.page_size());
        (idx < self.scripts.len()).then_some(idx)
    }

    pub fn selected_script(&self) -> Option<&Script> {
        self.selected_script_index().and_then(|i| self.scripts.get(i))
    }

    pub fn is_overdue(&self, task: &Task) -> bool {
        !task.completed && self.selected_date < self.today
    }

    // -----------------------------------------------------------------------
    // Cursor and page
    // -----------------------------------------------------------------------

    pub fn move_up(&mut self) {
        let ps = self.page_size();
        match self.tab {
            Tab::Tasks => {
                let count = self.filtered_tasks().len();
                self.task_pos.move_up(count, ps);
            }
            Tab::Scripts => self.script_pos.move_up(self.scripts.len(), ps),
        }
    }

    pub fn move_down(&mut self) {
        let ps = self.page_size();
        match self.tab {
            Tab::Tasks => {
                let count = self.filtered_tasks().len();
                self.task_pos.move_down(count, ps);
            }
            Tab::Scripts => self.script_pos.move_down(self.scripts.len(), ps),
        }
    }

    /// Pull both positions back inside their lists
    pub fn clamp_positions(&mut self) {
        let ps = self.page_size();
        let task_count = self.filtered_tasks().len();
        self.task_pos.clamp(task_count, ps);
        self.script_pos.clamp(self.scripts.len(), ps);
    }

    /// Point the task cursor at `key` if it is visible under the current filter
    pub fn select_task(&mut self, key: &TaskKey) {
        let ps = self.page_size();
        if let Some(idx) = self.filtered_tasks().iter().position(|t| key.matches(t)) {
            self.task_pos = PagePos::at(idx, ps);
        }
    }

    pub fn select_script(&mut self, idx: usize) {
        self.script_pos = PagePos::at(idx, self.page_size());
        self.clamp_positions();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "resize");
        // Keep the same rows selected under the new page size
        let old_ps = self.page_size();
        let task_idx = self.task_pos.index(old_ps);
        let script_idx = self.script_pos.index(old_ps);
        self.width = width;
        self.height = height;
        let ps = self.page_size();
        self.task_pos = PagePos::at(task_idx, ps);
        self.script_pos = PagePos::at(script_idx, ps);
        self.clamp_positions();
    }

    pub fn switch_tab(&mut self) {
        self.tab = self.tab.other();
        debug!(tab = self.tab.title(), "switched tab");
    }

    pub fn set_mode(&mut self, mode: Mode) {
        debug!(from = ?self.mode.kind(), to = ?mode.kind(), "mode change");
        self.mode = mode;
    }

    // -----------------------------------------------------------------------
    // Status slot
    // -----------------------------------------------------------------------

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level: StatusLevel::Info,
            text: text.into(),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!("{}", text);
        self.status = Some(StatusMessage {
            level: StatusLevel::Error,
            text,
        });
    }

    // -----------------------------------------------------------------------
    // Collaborators
    // -----------------------------------------------------------------------

    /// Replace the task list with `date`'s tasks and reset the position.
    /// A store failure leaves an empty day and reports it.
    pub fn load_day(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.task_pos.reset();
        match self.store.load_tasks(date) {
            Ok(mut tasks) => {
                task_ops::sort_tasks(&mut tasks);
                debug!(%date, count = tasks.len(), "loaded day");
                self.tasks = tasks;
            }
            Err(e) => {
                self.tasks = Vec::new();
                self.error(e.to_string());
            }
        }
    }

    fn load_scripts(&mut self) {
        match self.store.load_scripts() {
            Ok(scripts) => self.scripts = scripts,
            Err(e) => {
                self.scripts = Vec::new();
                self.error(e.to_string());
            }
        }
    }

    pub fn persist_tasks(&mut self) {
        if let Err(e) = self.store.save_tasks(self.selected_date, &self.tasks) {
            self.error(e.to_string());
        }
    }

    pub fn persist_scripts(&mut self) {
        if let Err(e) = self.store.save_scripts(&self.scripts) {
            self.error(e.to_string());
        }
    }

    /// Hand a resolved command to the launcher without waiting on it
    pub fn launch(&mut self, command: &str) {
        match self.launcher.launch(command) {
            Ok(()) => {
                info!(command, "launched script");
                self.info(format!("launched: {}", command));
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    /// Snapshot of everything needed to draw one frame
    pub fn view_model(&self) -> super::view_model::ViewModel {
        super::view_model::build(self)
    }

    pub fn prompt(&self) -> Option<&TextInput> {
        match &self.mode {
            Mode::EditingTask { input, .. }
            | Mode::GoingToDate { input }
            | Mode::EditingScript { input, .. }
            | Mode::CollectingArgument { input, .. } => Some(input),
            Mode::SearchingTasks => Some(&self.search),
            Mode::Viewing | Mode::ShowingHelp => None,
        }
    }

    /// Start a new draft or edit of the selected script
    pub fn begin_script_edit(&mut self, draft: ScriptDraft) {
        let input =
            TextInput::new(draft.step().placeholder()).with_value(draft.current_value());
        self.set_mode(Mode::EditingScript { draft, input });
    }
}

/// Run the TUI application
pub fn run(config: &Config, data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let store = FileStore::new(data_dir);
    let launcher = ShellLauncher::from_config(&config.runner);
    let today = Local::now().date_naive();

    let mut app = App::new(Box::new(store), Box::new(launcher), today);
    app.theme = Theme::from_config(&config.ui);
    app.show_key_hints = config.ui.show_key_hints;
    info!(data_dir = %data_dir.display(), %today, "starting tui");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let (width, height) = crossterm::terminal::size()?;
    app.resize(width, height);

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    info!("tui exited");

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
