//! Crew Match - field worker matching from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = crew_match::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
