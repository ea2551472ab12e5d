use std::error::Error;

use clap::Parser;
use zenith::cli::commands::Cli;
use zenith::cli::handlers;
use zenith::io::config_io;
use zenith::logging;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = config_io::load_config(cli.config.as_deref())?;
    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref(), &config);
    let _guard = logging::init(&data_dir);
    handlers::dispatch(cli, &config, &data_dir)
}
