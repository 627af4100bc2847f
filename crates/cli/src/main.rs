// stockguard CLI - stock level vs. minimum threshold analysis

mod analyze;
mod exit_codes;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use stockguard_recon::{ColumnAliases, ReconConfig};

use exit_codes::{EXIT_ERROR, EXIT_INPUT, EXIT_INVALID_CONFIG, EXIT_OUTPUT, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "stockguard")]
#[command(about = "Flag stock items below their minimum threshold")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Verbose diagnostics on stderr (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a stock file against a threshold file
    #[command(after_help = "\
Examples:
  stockguard analyze stock.xlsx seuils.xlsx
  stockguard analyze stock.xlsx seuils.xlsx --filter alert
  stockguard analyze stock.csv seuils.csv --json
  stockguard analyze stock.xlsx seuils.xlsx --export analyse.xlsx --unmatched
  stockguard analyze stock.xlsx seuils.xlsx --export-dir out/ --strict")]
    Analyze(analyze::AnalyzeArgs),

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  stockguard validate-config stockguard.toml")]
    ValidateConfig {
        /// Path to the TOML config file
        config: PathBuf,
    },

    /// Print the header aliases used to find each column
    Aliases {
        /// Config file overriding the built-in aliases
        #[arg(long, env = "STOCKGUARD_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  stockguard-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            eprintln!("Usage: stockguard <command> [options]");
            eprintln!("       stockguard --help for more information");
            Err(CliError { code: EXIT_USAGE, message: String::new(), hint: None })
        }
        Some(Commands::Analyze(args)) => analyze::cmd_analyze(args),
        Some(Commands::ValidateConfig { config }) => cmd_validate_config(config),
        Some(Commands::Aliases { config }) => cmd_aliases(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, msg)
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(EXIT_INVALID_CONFIG, msg)
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::new(EXIT_OUTPUT, msg)
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Built-in config, or the one at `path`.
pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<ReconConfig, CliError> {
    let Some(path) = path else {
        return Ok(ReconConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::config(format!("cannot read config {}: {e}", path.display())))?;
    let config = ReconConfig::from_toml(&content).map_err(|e| CliError::config(e.to_string()))?;
    log::debug!("loaded config '{}' from {}", config.name, path.display());
    Ok(config)
}

// ============================================================================
// validate-config
// ============================================================================

fn cmd_validate_config(path: PathBuf) -> Result<(), CliError> {
    let config = load_config(Some(&path))?;
    println!("{}: ok (config '{}')", path.display(), config.name);
    print_aliases(&config.columns);
    println!("export sheet: {}", config.export.sheet_name);
    println!("export prefix: {}", config.export.file_prefix);
    Ok(())
}

// ============================================================================
// aliases
// ============================================================================

fn cmd_aliases(config: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config.as_ref())?;
    print_aliases(&config.columns);
    Ok(())
}

fn print_aliases(aliases: &ColumnAliases) {
    for (label, list) in [
        ("identifier", &aliases.identifier),
        ("quantity", &aliases.quantity),
        ("threshold", &aliases.threshold),
    ] {
        let quoted: Vec<String> = list.iter().map(|a| format!("\"{a}\"")).collect();
        println!("{label:<10}  {}", quoted.join(", "));
    }
}
