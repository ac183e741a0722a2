use std::path::PathBuf;
use std::time::Duration;

use citesight_core::logging::init_logging;
use citesight_core::{Config, ExportFormat, ResearchPipeline};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

#[derive(Parser)]
#[command(name = "citesight")]
#[command(about = "Answer research questions from web sources with cited, cross-validated summaries", long_about = None)]
struct Cli {
    /// Config file to use instead of the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Research a question and print the report
    Research {
        /// The question to research
        #[arg(required = true)]
        question: Vec<String>,

        /// Output format: json or text
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the default configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config => {
            print!("{}", Config::default_config_string());
            Ok(())
        }
        Commands::Research {
            question,
            format,
            output,
        } => {
            let _ = dotenvy::dotenv();

            let mut config = match &cli.config {
                Some(path) => Config::from_file(path)?,
                None => Config::load()?,
            };
            if cli.verbose {
                config.logging.level = "debug".to_string();
            }
            init_logging(&config.logging)?;

            handle_research(&config, &question.join(" "), format, output).await
        }
    }
}

async fn handle_research(
    config: &Config,
    question: &str,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = ResearchPipeline::from_config(config)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting research");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed}]")?);
    spinner.set_message(format!("Researching: {}", question));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let report = pipeline.research(question).await;
    spinner.finish_and_clear();

    match output {
        Some(path) => {
            report.write_to(&path, format)?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{}", report.render(format)?),
    }

    if report.is_error() {
        std::process::exit(1);
    }

    Ok(())
}
