use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use csvfilter::cli::{self, Args};
use csvfilter::data::load_csv;

fn main() -> ExitCode {
    env_logger::init();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();

    let filter = load_csv(&args.file).context("failed to parse CSV file")?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut prompt = std::io::stderr();
    let mut out = std::io::stdout().lock();
    cli::run(&args, &filter, &mut input, &mut prompt, &mut out)
}
