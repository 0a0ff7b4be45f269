mod commands;
mod schema_file;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `SIFT_LOG=debug`).
const LOG_ENV: &str = "SIFT_LOG";

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Sift declarative payload checker.
#[derive(Parser)]
#[command(name = "sift", version, about = "Sift declarative payload checker")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode JSON payloads against a schema file and report every failure
    Check {
        /// Path to the TOML schema file
        schema: PathBuf,
        /// Paths to JSON payload files (`-` reads stdin)
        #[arg(required = true)]
        payloads: Vec<PathBuf>,
    },

    /// List the fields a schema file declares, in evaluation order
    Fields {
        /// Path to the TOML schema file
        schema: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Check { schema, payloads } => {
            commands::cmd_check(&schema, &payloads, cli.output, cli.quiet);
        }
        Commands::Fields { schema } => {
            commands::cmd_fields(&schema, cli.output, cli.quiet);
        }
    }
}

/// Log to stderr so stdout stays machine-readable. Defaults to `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}
