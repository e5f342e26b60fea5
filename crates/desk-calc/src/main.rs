//! desk-calc: desk calculator
//!
//! ## Usage
//!
//! ```bash
//! desk-calc                          # Interactive terminal calculator
//! desk-calc eval 5 + 3 + 2 =         # Headless evaluation
//! desk-calc history list             # Newest first
//! desk-calc age 1990-06-15           # Age breakdown
//! desk-calc convert 100 USD EUR      # Currency conversion
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use desk_calc::{handlers, logging, AppConfig, AppResult, Cli, Commands};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = cli.config();
    logging::init(config.verbosity);

    let mut out = io::stdout();
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(&config),
        Commands::Eval(args) => handlers::run_eval(&config, &args, &mut out),
        Commands::History(args) => handlers::run_history(&config, args.action, &mut out),
        Commands::Age(args) => handlers::run_age(&args, &mut out),
        Commands::Convert(args) => handlers::run_convert(&args, &mut out),
        Commands::Currencies => handlers::run_currencies(&mut out),
    }
}

#[cfg(feature = "tui")]
fn run_tui(config: &AppConfig) -> AppResult<()> {
    desk_calc::tui::run(config)
}

#[cfg(not(feature = "tui"))]
fn run_tui(_config: &AppConfig) -> AppResult<()> {
    Err(desk_calc::AppError::config(
        "Terminal UI not enabled. Rebuild with --features tui",
    ))
}
