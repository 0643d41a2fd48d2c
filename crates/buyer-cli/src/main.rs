//! buyer CLI - Procurement reporting
//!
//! Command-line interface for exporting procurement reports as Excel workbooks.

mod export;

use anyhow::Result;
use buyer_core::ReportSection;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "buyer")]
#[command(author, version, about = "Procurement reporting", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a procurement report to an Excel (.xlsx) workbook
    Report {
        /// Report data (JSON dump of a procurement report)
        #[arg(short, long, value_name = "FILE", env = "BUYER_REPORT_INPUT")]
        input: PathBuf,

        /// Output file (derived from the report timestamp if not specified)
        #[arg(short, long, value_name = "PATH", env = "BUYER_REPORT_OUTPUT")]
        output: Option<PathBuf>,

        /// Only include these sections (repeatable; see `buyer sections`)
        #[arg(short, long = "section", value_name = "NAME")]
        sections: Vec<ReportSection>,

        /// Override the report title
        #[arg(long)]
        title: Option<String>,

        /// Leave out the summary sheet
        #[arg(long)]
        no_summary: bool,
    },

    /// List the report sections accepted by `report --section`
    Sections,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Report {
            input,
            output,
            sections,
            title,
            no_summary,
        }) => {
            let options = export::ExportOptions {
                input,
                output,
                sections,
                title,
                no_summary,
            };
            let written = export::run(&options)?;
            println!("Report written to: {}", written.display());
        }
        Some(Commands::Sections) => {
            for section in ReportSection::ALL {
                println!("{:<16} {}", section.name(), section.title());
            }
        }
        None => {
            println!("buyer - Procurement reporting");
            println!("Run with --help for usage information");
        }
    }

    Ok(())
}
