//! Print QR code label sheets.
//!
//! Usage:
//!   qrsheet load [--input codes.csv] [--column code] [--output qr_codes.pdf]
//!   qrsheet generate [--count 100] [--export codes.csv] [--output qr_codes.pdf]
//!
//! Both commands accept `--config <path>` pointing at a JSON `SheetConfig`.
//! Set `RUST_LOG=debug` for pagination details.

use clap::{Parser, Subcommand};
use qrsheet::api::{render_from_table, render_generated};
use qrsheet::codes::CODE_COLUMN;
use qrsheet::SheetConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Lay out codes as QR symbols on printable A4 sheets
#[derive(Parser, Debug)]
#[command(name = "qrsheet")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the codes listed in a CSV column
    Load {
        /// CSV file with a header row
        #[arg(long, default_value = "codes.csv")]
        input: PathBuf,

        /// Column holding the codes
        #[arg(long, default_value = CODE_COLUMN)]
        column: String,

        /// Output PDF
        #[arg(long, default_value = "qr_codes.pdf")]
        output: PathBuf,

        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate unique codes, export them to CSV and render them
    Generate {
        /// Number of codes (defaults to the configured count)
        #[arg(long)]
        count: Option<usize>,

        /// CSV file receiving the generated codes
        #[arg(long, default_value = "codes.csv")]
        export: PathBuf,

        /// Output PDF
        #[arg(long, default_value = "qr_codes.pdf")]
        output: PathBuf,

        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> qrsheet::Result<SheetConfig> {
    match path {
        Some(path) => SheetConfig::from_json_file(path),
        None => Ok(SheetConfig::default()),
    }
}

fn run(cli: Cli) -> qrsheet::Result<()> {
    match cli.command {
        Command::Load {
            input,
            column,
            output,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let document = render_from_table(&input, &column, &output, &config)?;
            println!(
                "Wrote {} codes on {} pages to {}",
                document.placements().count(),
                document.page_count(),
                output.display()
            );
        },
        Command::Generate {
            count,
            export,
            output,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let count = count.unwrap_or(config.count);
            let sheet = render_generated(count, &export, &output, &config)?;
            println!(
                "Generated {} codes into {}, {} pages written to {}",
                sheet.codes.len(),
                export.display(),
                sheet.document.page_count(),
                output.display()
            );
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
