//! codeshift command line entry point.
//!
//! Compares original and suggested code and prints the result as text, JSON
//! or a unified patch.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use codeshift::application::compare::{self, format_comparison, format_patch};
use codeshift::domain::{CodeChange, Comparison, DiffError, ViewMode};
use codeshift::infra::app_config::{self, AppConfig};
use codeshift::infra::cli::input::{self, InputSource};

#[derive(Parser, Debug)]
#[command(name = "codeshift")]
#[command(version)]
#[command(about = "Compare legacy code with its suggested modernization", long_about = None)]
struct Args {
    /// View used for text output (unified, side-by-side)
    #[arg(long, global = true, default_value = "unified")]
    view: ViewMode,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Unchanged lines around each change in patch output
    #[arg(long, global = true)]
    context: Option<usize>,

    /// Total width of side-by-side text output
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Refuse inputs whose combined line count exceeds this
    #[arg(long, global = true)]
    max_lines: Option<usize>,

    /// Disable intra-line highlighting in side-by-side views
    #[arg(long, global = true)]
    no_inline: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two files (either may be `-` for stdin)
    Files {
        original: String,
        suggested: String,
        /// Display name (defaults to the suggested file name)
        #[arg(long)]
        name: Option<String>,
        /// Language hint for presentation
        #[arg(long)]
        language: Option<String>,
    },

    /// Compare every change in a JSON document (`-` for stdin)
    Changes { path: String },

    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Patch,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if let Some(diff_err) = err.downcast_ref::<DiffError>() {
                eprintln!("Hint: {}", diff_err.hint());
            }
            ExitCode::from(2)
        }
    }
}

/// Returns whether any compared change differs.
fn run(args: Args) -> Result<bool> {
    let mut config = match &args.config {
        Some(path) => app_config::load_config_from(path)?,
        None => app_config::load_config(),
    };
    if let Some(context) = args.context {
        config.context_lines = context;
    }
    if let Some(width) = args.width {
        config.side_by_side_width = width;
    }
    if let Some(max_lines) = args.max_lines {
        config.max_total_lines = max_lines;
    }
    if args.no_inline {
        config.inline_highlight = false;
    }

    let changes = match args.command {
        Commands::Files {
            original,
            suggested,
            name,
            language,
        } => vec![input::code_change_from_sources(
            &InputSource::parse(&original),
            &InputSource::parse(&suggested),
            name,
            language,
        )?],
        Commands::Changes { path } => input::read_code_changes(&InputSource::parse(&path))?,
        Commands::InitConfig { force } => {
            init_config(args.config, force)?;
            return Ok(false);
        }
    };

    log::debug!("comparing {} change(s)", changes.len());
    print_changes(&changes, &config, args.view, args.format)
}

fn print_changes(
    changes: &[CodeChange],
    config: &AppConfig,
    view: ViewMode,
    format: OutputFormat,
) -> Result<bool> {
    let diff_options = config.diff_options();
    let render_options = config.render_options();
    let mut any_changes = false;

    match format {
        OutputFormat::Patch => {
            for change in changes {
                let result =
                    compare::compute_diff_with(&change.original, &change.suggested, &diff_options)
                        .with_context(|| format!("Cannot compare {}", change.file_name))?;
                any_changes |= result.has_changes();
                print!(
                    "{}",
                    format_patch(
                        &result,
                        &change.file_name,
                        &change.file_name,
                        config.context_lines
                    )
                );
            }
        }
        OutputFormat::Json | OutputFormat::Text => {
            let comparisons = changes
                .iter()
                .map(|change| {
                    compare::compare(change, &diff_options, &render_options, view)
                        .with_context(|| format!("Cannot compare {}", change.file_name))
                })
                .collect::<Result<Vec<Comparison>>>()?;
            any_changes = comparisons.iter().any(Comparison::has_changes);

            if format == OutputFormat::Json {
                let json = serde_json::to_string_pretty(&comparisons)
                    .context("Failed to serialize comparisons")?;
                println!("{}", json);
            } else {
                for comparison in &comparisons {
                    print!(
                        "{}",
                        format_comparison(comparison, config.side_by_side_width)
                    );
                }
            }
        }
    }

    Ok(any_changes)
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(app_config::config_path);
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    app_config::save_config_to(&path, &AppConfig::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}
