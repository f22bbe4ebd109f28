use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use rawdisc::cli::{error_chain, init_logger};
use rawdisc::{extract_file, ToolConfig};

/// Strip sector headers and footers from a raw 2352-byte/sector track image,
/// writing the 2048-byte payloads to `output.bin`.
#[derive(Parser)]
#[command(name = "extract-data", version)]
struct Cli {
    /// Raw track image to read
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logger() {
        eprintln!("Unable to initialize logger: {e}");
    }

    match extract_file(&ToolConfig::extractor(cli.input)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}
