use clap::{Parser, Subcommand};
use std::path::PathBuf;
use romcrc_cli::commands::{check, fix, inspect};
use romcrc_cli::input::parse_size;
use romcrc_cli::telemetry;

#[derive(Parser)]
#[command(name = "romcrc")]
#[command(about = "Verify and repair the boot checksum of controller ROM images", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether the checksum is correct, and probe for the size it
    /// actually covers.
    Check {
        /// Binary file of the stock ROM
        image: PathBuf,

        /// Size of the checksum-controlled region; may differ from the file size.
        /// Decimal or 0x-prefixed hex.
        #[arg(value_parser = parse_size)]
        size: usize,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the correction word and save the verified image
    Fix {
        image: PathBuf,

        #[arg(value_parser = parse_size)]
        size: usize,

        /// Destination for the corrected ROM (declared size bytes)
        output: PathBuf,

        #[arg(long)]
        json: bool,
    },
    /// Show header fields, correction slot and checksum
    Inspect {
        image: PathBuf,

        /// Declared size (defaults to the file size)
        #[arg(long, short, value_parser = parse_size)]
        size: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_logging(cli.verbose);

    match cli.command {
        Commands::Check { image, size, json } => check::run(&image, size, json).map(|_| ()),
        Commands::Fix {
            image,
            size,
            output,
            json,
        } => fix::run(&image, size, &output, json).map(|_| ()),
        Commands::Inspect { image, size } => inspect::run(&image, size),
    }
}
