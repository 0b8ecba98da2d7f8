use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    city_scrapers_det::logging::init().context("init logging")?;

    let cli = city_scrapers_det::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        city_scrapers_det::cli::Command::Crawl(args) => {
            city_scrapers_det::crawl::run(args).context("crawl")?;
        }
        city_scrapers_det::cli::Command::Parse(args) => {
            city_scrapers_det::parse::run(args).context("parse")?;
        }
    }

    Ok(())
}
