use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zenith", about = concat!("zenith v", env!("CARGO_PKG_VERSION"), " - daily tasks and a script launcher"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding task and script files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Read configuration from this file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tasks of a day
    List(ListArgs),
    /// Add a task to a day
    Add(AddArgs),
    /// List the script library
    Scripts,
    /// Run a script from the library
    Run(RunArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Day to list (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Day to add the task to (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct RunArgs {
    /// Script name
    pub name: String,
    /// Placeholder value, repeatable
    #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub args: Vec<(String, String)>,
    /// Print the resolved command instead of launching it
    #[arg(long)]
    pub print: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn key_value_splits_on_first_equals() {
        assert_eq!(
            parse_key_value("query=a=b"),
            Ok(("query".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_key_value("msg="), Ok(("msg".to_string(), String::new())));
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn run_collects_repeated_args() {
        let cli = Cli::parse_from([
            "zenith", "run", "deploy", "--arg", "env=prod", "--arg", "tag=v2", "--print",
        ]);
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.name, "deploy");
        assert_eq!(
            args.args,
            vec![
                ("env".to_string(), "prod".to_string()),
                ("tag".to_string(), "v2".to_string())
            ]
        );
        assert!(args.print);
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["zenith", "list", "--date", "2024-02-30"]).is_err());
        let cli = Cli::try_parse_from(["zenith", "--data-dir", "/tmp/z", "list", "--date", "2024-02-29"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/z")));
    }
}
