use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use dae_registry::types::TableRow;
use dae_registry::{logging, CleanRecord, Config, Fetcher, Pipeline, PipelineReport, Table};

#[derive(Parser)]
#[command(name = "dae_registry")]
#[command(about = "Montpellier defibrillator registry loader and cleaner")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the registry export into the local cache
    Fetch {
        /// Source URL (defaults to the configured one)
        #[arg(long)]
        url: Option<String>,
        /// Download even if a cached copy exists
        #[arg(long)]
        force: bool,
    },
    /// Run the cleaning pipeline and write the clean table
    Clean {
        /// CSV export to clean (defaults to the cached copy)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Fetch the export first if it is not cached
        #[arg(long)]
        fetch: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the clean schema and a summary of the data
    Schema {
        /// CSV export to inspect (defaults to the cached copy)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn resolve_path(config: &Config, path: Option<PathBuf>, fetch: bool) -> anyhow::Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None if fetch => Fetcher::new(&config.data_dir)
            .fetch(&config.source_url, false)
            .context("failed to fetch registry export"),
        None => Ok(config.data_path()),
    }
}

fn write_table<W: Write>(table: &Table<CleanRecord>, format: OutputFormat, writer: W) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for record in table {
                csv_writer.serialize(record)?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(writer, table.rows())?;
        }
    }
    Ok(())
}

fn print_schema(table: &Table<CleanRecord>, report: &PipelineReport, path: &Path) {
    println!("Source: {}", path.display());
    println!("Rows: {}", report.rows);
    println!();
    println!("{:<24} {:<8} {:>8}", "column", "type", "missing");
    for ((name, column_type), (_, missing)) in table.schema().iter().zip(&report.missing) {
        println!("{:<24} {:<8} {:>8}", name, column_type.to_string(), missing);
    }
    println!();
    println!("Cells cleared by sanitizer:");
    for (sanitizer, cleared) in &report.cleared_by_sanitizer {
        println!("  {:<22} {}", sanitizer, cleared);
    }
    println!("Addresses derived: {}", report.addresses_derived);
    println!("Output columns: {}", CleanRecord::schema().len());
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Fetch { url, force } => {
            let url = url.unwrap_or_else(|| config.source_url.clone());
            let path = Fetcher::new(&config.data_dir).fetch(&url, force)?;
            println!("{}", path.display());
        }
        Commands::Clean {
            path,
            fetch,
            format,
            output,
        } => {
            let path = resolve_path(&config, path, fetch)?;
            let (table, report) = Pipeline::new(&config)
                .run(&path)
                .with_context(|| format!("failed to clean {}", path.display()))?;

            match output {
                Some(output) => {
                    let file = File::create(&output)
                        .with_context(|| format!("failed to create {}", output.display()))?;
                    write_table(&table, format, file)?;
                    info!(output = %output.display(), rows = report.rows, "Wrote clean table");
                }
                None => write_table(&table, format, io::stdout().lock())?,
            }
        }
        Commands::Schema { path } => {
            let path = resolve_path(&config, path, false)?;
            let (table, report) = Pipeline::new(&config).run(&path)?;
            print_schema(&table, &report, &path);
        }
    }

    Ok(())
}
