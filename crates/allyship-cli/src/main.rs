use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "allyship", version, about = "Allyship Companion CLI")]
pub struct Cli {
    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = commands::parse_date)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the reflection prompt for a date
    Prompt(commands::prompt::PromptArgs),
    /// Save a reflection for a date
    Write(commands::write::WriteArgs),
    /// Saved reflections
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Export the weekly or sprint summary
    Summary(commands::summary::SummaryArgs),
    /// 14-day sprint management
    Sprint {
        #[command(subcommand)]
        action: commands::sprint::SprintAction,
    },
    /// Reminder cadence
    Cadence {
        #[command(subcommand)]
        action: commands::cadence::CadenceAction,
    },
    /// Preference management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ALLYSHIP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(allyship_core::dates::today_local);
    let result = match cli.command {
        Commands::Prompt(args) => commands::prompt::run(args, today),
        Commands::Write(args) => commands::write::run(args, today),
        Commands::History { action } => commands::history::run(action, today),
        Commands::Summary(args) => commands::summary::run(args, today),
        Commands::Sprint { action } => commands::sprint::run(action, today),
        Commands::Cadence { action } => commands::cadence::run(action, today),
        Commands::Config { action } => commands::config::run(action, today),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
