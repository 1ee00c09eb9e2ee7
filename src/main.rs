//! Brewhouse - Batch tracking and planning for a small brewery

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = brewhouse::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
