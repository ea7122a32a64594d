// src/bin/cli.rs
use fest_results::cli::{self, Command};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    match cli::parse_args(std::env::args().skip(1))? {
        Command::Help => print!("{}", cli::HELP),
        Command::Run(params) => cli::run(&params)?,
    }
    Ok(())
}
