use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use chrono::{Local, NaiveDate, Utc};
use tracing::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::runner::{Launcher, ShellLauncher};
use crate::io::storage::{FileStore, Store};
use crate::model::{Config, Script};
use crate::ops::{script_ops, task_ops, template};

/// Errors specific to command-line use
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no script named '{0}'")]
    UnknownScript(String),
    #[error("missing value for {}: pass --arg KEY=VALUE", .0.join(", "))]
    MissingArgs(Vec<String>),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: &Config, data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    let today = Local::now().date_naive();
    let mut store = FileStore::new(data_dir);

    match cli.command {
        None => crate::tui::run(config, data_dir),
        Some(Commands::List(args)) => cmd_list(&store, args.date.unwrap_or(today), json),
        Some(Commands::Add(args)) => cmd_add(&mut store, args.date.unwrap_or(today), &args.title),
        Some(Commands::Scripts) => cmd_scripts(&store, json),
        Some(Commands::Run(args)) => {
            let mut launcher = ShellLauncher::from_config(&config.runner);
            cmd_run(&store, &mut launcher, args)
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &dyn Store, date: NaiveDate, json: bool) -> Result<(), Box<dyn Error>> {
    let mut tasks = store.load_tasks(date)?;
    task_ops::sort_tasks(&mut tasks);

    if json {
        let day = DayJson {
            date,
            tasks: tasks.iter().map(task_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&day)?);
    } else if tasks.is_empty() {
        println!("no tasks for {}", date);
    } else {
        for line in format_day_listing(&tasks) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_add(store: &mut dyn Store, date: NaiveDate, title: &str) -> Result<(), Box<dyn Error>> {
    let mut tasks = store.load_tasks(date)?;
    let key = task_ops::create_task(&mut tasks, title, Utc::now())?;
    store.save_tasks(date, &tasks)?;
    info!(title = %key.title, %date, "added task from cli");
    println!("added \"{}\" to {}", key.title, date);
    Ok(())
}

fn cmd_scripts(store: &dyn Store, json: bool) -> Result<(), Box<dyn Error>> {
    let scripts = store.load_scripts()?;
    if json {
        let out: Vec<ScriptJson> = scripts.iter().map(script_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_script_listing(&scripts) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_run(
    store: &dyn Store,
    launcher: &mut dyn Launcher,
    args: RunArgs,
) -> Result<(), Box<dyn Error>> {
    let scripts = store.load_scripts()?;
    let command = resolve_command(&scripts, &args.name, args.args)?;
    if args.print {
        println!("{}", command);
        return Ok(());
    }
    launcher.launch(&command)?;
    info!(name = %args.name, command = %command, "launched script from cli");
    println!("launched: {}", command);
    Ok(())
}

/// Look up `name` and fill in every placeholder from `values`
pub fn resolve_command(
    scripts: &[Script],
    name: &str,
    values: Vec<(String, String)>,
) -> Result<String, CliError> {
    let script = script_ops::find_by_name(scripts, name)
        .ok_or_else(|| CliError::UnknownScript(name.to_string()))?;
    let values: HashMap<String, String> = values.into_iter().collect();
    let missing = template::missing(&script.command, &values);
    if !missing.is_empty() {
        return Err(CliError::MissingArgs(missing));
    }
    Ok(template::substitute(&script.command, &values))
}
