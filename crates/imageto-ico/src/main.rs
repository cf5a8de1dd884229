//! Command-line front end for imageto-ico.
//!
//! Converts PNG, JPEG, WebP, GIF, SVG, TIFF and BMP images into
//! multi-resolution Windows ICO files.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use imageto_ico_core::PayloadFormat;

use commands::SizeList;

#[derive(Parser)]
#[command(name = "imageto-ico")]
#[command(version, about = "Convert images to multi-resolution ICO files")]
struct Cli {
    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log progress (-v) or every rendered frame (-vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to ICO format
    #[command(alias = "c")]
    Convert {
        /// Input image file
        input: PathBuf,

        /// Output ICO file (defaults to the input name with .ico)
        output: Option<PathBuf>,

        /// Icon sizes, comma-separated, in directory order
        #[arg(
            short,
            long,
            default_value = "16,32,48,64,128,256",
            value_parser = commands::parse_size_list
        )]
        sizes: SizeList,

        /// Frame encoding: png, or bmp for legacy readers
        #[arg(short, long, default_value = "png")]
        format: PayloadFormat,
    },
    /// Convert multiple images to ICO format
    #[command(alias = "b")]
    Batch {
        /// Input image files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Icon sizes, comma-separated, in directory order
        #[arg(
            short,
            long,
            default_value = "16,32,48,64,128,256",
            value_parser = commands::parse_size_list
        )]
        sizes: SizeList,

        /// Frame encoding: png, or bmp for legacy readers
        #[arg(short, long, default_value = "png")]
        format: PayloadFormat,

        /// Write a JSON report of every conversion to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Show supported formats and default settings
    #[command(alias = "i")]
    Info,
    /// Print the directory table of an ICO file
    Inspect {
        /// ICO file to read
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            sizes,
            format,
        } => commands::convert::run(
            &input,
            output.as_deref(),
            sizes.into_inner(),
            format,
            cli.quiet,
        ),
        Commands::Batch {
            inputs,
            output,
            sizes,
            format,
            report,
        } => commands::batch::run(
            &inputs,
            &output,
            sizes.into_inner(),
            format,
            report.as_deref(),
            cli.quiet,
        ),
        Commands::Info => {
            commands::info::run();
            Ok(())
        }
        Commands::Inspect { file } => commands::inspect::run(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins over `-v`. Failed jobs are already reported on stderr,
/// so the default filter stays at `error`.
fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
