use clap::{Args, Parser, Subcommand};

use crate::spider::FEED_URL;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Crawl(CrawlArgs),
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
pub struct CrawlArgs {
    /// Page to scrape (must be http/https).
    #[arg(long, default_value = FEED_URL)]
    pub url: String,

    /// Output file for meeting records (JSON Lines).
    #[arg(long)]
    pub out: String,

    /// Directory for raw page/response snapshots.
    #[arg(long)]
    pub raw: Option<String>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Saved initial page HTML (see `crawl --raw`).
    #[arg(long)]
    pub initial: String,

    /// Saved call-back response body (see `crawl --raw`).
    #[arg(long)]
    pub response: String,

    /// Output file for meeting records (JSON Lines).
    #[arg(long)]
    pub out: String,

    /// Processing clock for status derivation, `%Y-%m-%dT%H:%M`
    /// (default: local wall clock).
    #[arg(long)]
    pub now: Option<String>,
}
