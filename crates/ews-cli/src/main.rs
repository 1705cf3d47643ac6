mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::detect::DetectArgs;
use commands::extract::ExtractArgs;
use commands::score::ScoreArgs;

/// Early-warning financial distress analysis of statement workbooks
#[derive(Parser)]
#[command(
    name = "ews",
    version,
    about = "Early-warning financial distress analysis of statement workbooks",
    long_about = "Reads balance-sheet and income-statement workbooks (code-based \
                  exports or Vietnamese statements), extracts a canonical set of \
                  facts per fiscal year and scores them with the Z'' discriminant, \
                  a composite score and a three-signal early-warning tier."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract per-year facts from a workbook
    Extract(ExtractArgs),
    /// Extract a workbook and analyse one fiscal year
    Analyze(AnalyzeArgs),
    /// Score a single facts map (ratios, models, signals, recommendations)
    Score(ScoreArgs),
    /// Report the detected statement layout
    Detect(DetectArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,ews_core=info,ews=info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Extract(args) => commands::extract::run_extract(args),
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Score(args) => commands::score::run_score(args),
        Commands::Detect(args) => commands::detect::run_detect(args),
        Commands::Version => {
            println!("ews {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
