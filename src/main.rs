//! docdrop - Collect documents for conversion.
//!
//! Usage:
//!   docdrop list [PATHS]...     Show the collected documents
//!   docdrop export [PATHS]...   Write the collected paths as JSON
//!   docdrop --help              Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use docdrop_collection::{DocsWidget, format_size};
use docdrop_core::{CollectionConfig, display_width, pad_label};

#[derive(Parser)]
#[command(
    name = "docdrop",
    version,
    about = "Collect documents by path for later conversion",
    long_about = "docdrop builds the same deduplicated, name-ordered document list a \
                  drop target would, measuring directories recursively.\n\n\
                  Paths that cannot be read are reported and skipped."
)]
struct Cli {
    /// Log collection activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Follow symbolic links when measuring directories
    #[arg(short = 'L', long, global = true)]
    follow_symlinks: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List collected documents with their sizes
    List {
        /// Files or directories to collect
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Terminal width available for each row
        #[arg(short, long, default_value = "80")]
        width: usize,

        /// Columns kept for the size column
        #[arg(long, default_value = "14")]
        reserve: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Export the collected paths as a JSON array
    Export {
        /// Files or directories to collect
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::List {
            paths,
            width,
            reserve,
            format,
        } => {
            let config = CollectionConfig::builder()
                .follow_symlinks(cli.follow_symlinks)
                .label_reserve(reserve)
                .build()
                .context("Invalid configuration")?;
            run_list(config, &paths, width, format)?;
        }
        Command::Export { paths, output } => {
            let config = CollectionConfig::builder()
                .follow_symlinks(cli.follow_symlinks)
                .build()
                .context("Invalid configuration")?;
            run_export(config, &paths, output)?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Collect `paths` into a widget, reporting the ones that were skipped.
fn collect(config: CollectionConfig, paths: &[PathBuf]) -> DocsWidget {
    let mut widget = DocsWidget::with_config(config);
    for err in widget.add_files(paths) {
        eprintln!("skipping: {err}");
    }
    debug!(
        entries = widget.collection().len(),
        revision = widget.collection().revision(),
        "collection ready"
    );
    widget
}

/// Show the collected documents.
fn run_list(
    config: CollectionConfig,
    paths: &[PathBuf],
    width: usize,
    format: OutputFormat,
) -> Result<()> {
    let widget = collect(config, paths);

    match format {
        OutputFormat::Text => {
            if widget.show_drop_hint() {
                println!(" No documents collected.");
                return Ok(());
            }

            let rows = widget.rows(width);
            let name_width = rows.iter().map(|r| display_width(&r.label)).max().unwrap_or(0) + 1;
            for row in &rows {
                let marker = if row.kind.is_dir() { "/" } else { "" };
                let name = format!("{}{}", row.label, marker);
                println!(" {} {:>10}", pad_label(&name, name_width), row.size);
            }
            println!("{}", "─".repeat(width.min(60)));
            println!(
                " {} document(s), {}",
                widget.collection().len(),
                format_size(widget.collection().total_size())
            );
        }
        OutputFormat::Json => {
            let (entries, skipped) = widget.utf8_entries();
            report_non_utf8(&skipped);
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

/// Export the collected paths in display order.
fn run_export(config: CollectionConfig, paths: &[PathBuf], output: Option<PathBuf>) -> Result<()> {
    let widget = collect(config, paths);
    let (entries, skipped) = widget.utf8_entries();
    report_non_utf8(&skipped);
    let filenames: Vec<&Path> = entries.iter().map(|entry| entry.path.as_path()).collect();
    let json = serde_json::to_string_pretty(&filenames)?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

/// Report entries left out of JSON output because their paths are not UTF-8.
fn report_non_utf8(paths: &[PathBuf]) {
    for path in paths {
        eprintln!("skipping {}: path is not valid UTF-8", path.display());
    }
}
