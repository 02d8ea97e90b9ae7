//! Binary entrypoint for the `linksweep` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    linksweep::logger::init();
    match linksweep::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.code())
        }
    }
}
