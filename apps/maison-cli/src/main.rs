//! Maison storefront CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use maison_cli::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    maison_cli::init_tracing(cli.verbose);

    match maison_cli::run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
