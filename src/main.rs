use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    match charter::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
