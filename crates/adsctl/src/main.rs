//! Meta Ads Expert - command line client
//!
//! Collects product, location and budget, asks the generation API for a
//! structured campaign strategy and renders or exports the report.

use adsctl::commands::{self, Overrides, ReportOptions};
use adsctl::errors::{Outcome, EXIT_GENERAL_ERROR};
use adsctl::logging::{self, LogEntry};
use adsctl::output::{self, OutputFormat};
use ads_common::StrategyForm;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

// Version is embedded at build time
const VERSION: &str = env!("ADSCTL_VERSION");

#[derive(Parser)]
#[command(name = "adsctl")]
#[command(about = "Meta Ads Expert - campaign strategy reports", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Log to stderr at debug level instead of the log file
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct FormArgs {
    /// Product or service name
    #[arg(long)]
    product: String,

    /// Target location
    #[arg(long)]
    location: String,

    /// Monthly budget in INR
    #[arg(long)]
    budget: String,
}

impl From<FormArgs> for StrategyForm {
    fn from(args: FormArgs) -> Self {
        StrategyForm::new(args.product, args.location, args.budget)
    }
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write meta-ads-expert-report.csv
    #[arg(long)]
    csv: bool,

    /// Write meta-ads-expert-report.pdf
    #[arg(long)]
    pdf: bool,

    /// Copy the targeting block to the clipboard
    #[arg(long)]
    copy: bool,

    /// Directory for exports (overrides config)
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

impl OutputArgs {
    fn options(&self) -> ReportOptions {
        ReportOptions {
            format: self.format,
            csv: self.csv,
            pdf: self.pdf,
            copy: self.copy,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the form and work with the report interactively (default)
    Interactive {
        /// Directory for exports (overrides config)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Model name (overrides config)
        #[arg(long)]
        model: Option<String>,
    },

    /// Generate one report non-interactively
    Generate {
        #[command(flatten)]
        form: FormArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Model name (overrides config)
        #[arg(long)]
        model: Option<String>,
    },

    /// Render or export a saved JSON report without calling the API
    Render {
        /// Report JSON file
        #[arg(long)]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the prompt that would be sent
    Prompt {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Print the structured-output schema
    Schema,

    /// Show the effective configuration
    Config {
        /// Write the default config file
        #[arg(long)]
        init: bool,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Interactive { .. } => "interactive",
            Commands::Generate { .. } => "generate",
            Commands::Render { .. } => "render",
            Commands::Prompt { .. } => "prompt",
            Commands::Schema => "schema",
            Commands::Config { .. } => "config",
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<Outcome> {
    match command {
        Commands::Interactive { out_dir, model } => {
            commands::interactive(&Overrides { model, out_dir }).await
        }
        Commands::Generate {
            form,
            output,
            model,
        } => {
            let overrides = Overrides {
                model,
                out_dir: output.out_dir.clone(),
            };
            commands::generate(form.into(), &output.options(), &overrides).await
        }
        Commands::Render { input, output } => {
            let overrides = Overrides {
                model: None,
                out_dir: output.out_dir.clone(),
            };
            commands::render(&input, &output.options(), &overrides)
        }
        Commands::Prompt { form } => commands::prompt(form.into()),
        Commands::Schema => commands::schema(),
        Commands::Config { init } => commands::config(init),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let log_file = logging::init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Interactive {
        out_dir: None,
        model: None,
    });
    let command_name = command.name();
    tracing::info!(command = command_name, version = VERSION, log_file = ?log_file, "adsctl starting");

    let start = Instant::now();
    let outcome = match run(command).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("{:#}", e);
            output::display_error(&format!("{:#}", e));
            Outcome::failed(EXIT_GENERAL_ERROR, "general", format!("{:#}", e))
        }
    };

    let entry = LogEntry {
        ts: LogEntry::now(),
        req_id: LogEntry::generate_req_id(),
        command: command_name.to_string(),
        exit_code: outcome.exit_code,
        duration_ms: start.elapsed().as_millis() as u64,
        ok: outcome.is_ok(),
        error: outcome.error,
    };
    if let Err(e) = entry.write() {
        tracing::debug!("Failed to write invocation log: {}", e);
    }

    std::process::exit(outcome.exit_code);
}
