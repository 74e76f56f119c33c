//! Binary entrypoint for the `neuronbridge` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is fine; settings fall back to flags and defaults.
    let _ = dotenvy::dotenv();

    // Recording and replay are handled in commands::dispatch via NB_RECORD / NB_REPLAY.
    match neuronbridge::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(neuronbridge::Error::Usage(err)) => {
            let _ = err.print();
            if err.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
