//! CLI command definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{AppConfig, Verbosity};

/// desk-calc: desk calculator with history, age and currency tools
#[derive(Parser, Debug)]
#[command(name = "desk-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// History file location
    #[arg(long, env = "DESK_CALC_HISTORY", global = true, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Subcommand to run (defaults to the terminal UI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Resolves the configuration from flags, environment and defaults
    #[must_use]
    pub fn config(&self) -> AppConfig {
        let config =
            AppConfig::new().with_verbosity(Verbosity::from_flags(self.verbose, self.quiet));
        match &self.history_file {
            Some(path) => config.with_history_path(path.clone()),
            None => config,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive terminal calculator
    Tui,

    /// Feed keypad labels to the calculator and print the display
    ///
    /// Example: desk-calc eval 5 + 3 + 2 =
    Eval(EvalArgs),

    /// View or clear the calculation history
    History(HistoryArgs),

    /// Calculate an age from a birth date
    Age(AgeArgs),

    /// Convert an amount between currencies
    Convert(ConvertArgs),

    /// List supported currencies and their rates
    Currencies,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Keypad labels: digits, . + - * / = C CE bs sqr sqrt inv neg %
    #[arg(required = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Do not record completed calculations in the history file
    #[arg(long)]
    pub no_history: bool,
}

/// Arguments for the history command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// History action
    #[command(subcommand)]
    pub action: HistoryAction,
}

/// History subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    /// List entries, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every entry
    Clear,
}

/// Arguments for the age command
#[derive(Parser, Debug)]
pub struct AgeArgs {
    /// Birth date (YYYY-MM-DD)
    pub birth: String,

    /// Reference date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub today: Option<String>,
}

/// Arguments for the convert command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Amount to convert
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// Source currency code (e.g. USD)
    pub from: String,

    /// Target currency code (e.g. EUR)
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eval() {
        let cli = Cli::parse_from(["desk-calc", "eval", "5", "+", "3", "="]);
        match cli.command {
            Some(Commands::Eval(args)) => {
                assert_eq!(args.tokens, vec!["5", "+", "3", "="]);
                assert!(!args.no_history);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_eval_with_minus_token() {
        let cli = Cli::parse_from(["desk-calc", "eval", "9", "-", "4", "="]);
        assert!(matches!(cli.command, Some(Commands::Eval(_))));
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["desk-calc"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_history_file_flag_overrides_config() {
        let cli = Cli::parse_from(["desk-calc", "--history-file", "/tmp/h.txt", "currencies"]);
        assert_eq!(cli.config().history_path, PathBuf::from("/tmp/h.txt"));
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::parse_from(["desk-calc", "-vv", "currencies"]);
        assert_eq!(cli.config().verbosity, Verbosity::Debug);
        let cli = Cli::parse_from(["desk-calc", "-q", "currencies"]);
        assert_eq!(cli.config().verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_parse_history_list_json() {
        let cli = Cli::parse_from(["desk-calc", "history", "list", "--json"]);
        match cli.command {
            Some(Commands::History(args)) => {
                assert_eq!(args.action, HistoryAction::List { json: true });
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_age_with_today() {
        let cli = Cli::parse_from(["desk-calc", "age", "1990-06-15", "--today", "2024-06-15"]);
        match cli.command {
            Some(Commands::Age(args)) => {
                assert_eq!(args.birth, "1990-06-15");
                assert_eq!(args.today.as_deref(), Some("2024-06-15"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
