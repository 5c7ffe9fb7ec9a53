// src/main.rs

use std::process::ExitCode;

use autoignore::{cli, logging, run, EXIT_ERROR};

fn main() -> ExitCode {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("autoignore error: {err:?}");
        return ExitCode::from(EXIT_ERROR);
    }

    match run(args) {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(err) => {
            eprintln!("autoignore error: {err}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
