use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use rawdisc::cli::{error_chain, init_logger};
use rawdisc::{scan_file, ToolConfig};

/// List every 4-byte ASCII tag that starts a 256-byte block right after an
/// all-zero block, writing `OOOO: TTTT` lines to `all-tables.txt`.
#[derive(Parser)]
#[command(name = "get-tables", version)]
struct Cli {
    /// Binary file to scan
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logger() {
        eprintln!("Unable to initialize logger: {e}");
    }

    match scan_file(&ToolConfig::scanner(cli.input)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}
