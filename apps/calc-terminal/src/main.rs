//! # Desk Calculator Entry Point
//!
//! Parses the command line and hands off to [`calc_terminal_lib::run`].

use clap::Parser;

use calc_terminal_lib::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = calc_terminal_lib::run(cli).await {
        eprintln!("calc-terminal: {}", err);
        std::process::exit(1);
    }
}
