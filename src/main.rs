//! carnet binary entrypoint.

mod cli;

use clap::Parser;
use colored::Colorize;

fn main() {
    let args = cli::Cli::parse();
    if let Err(err) = cli::run(args) {
        eprintln!("{} {}", "error:".bright_red().bold(), err);
        std::process::exit(1);
    }
}
