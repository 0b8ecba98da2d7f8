use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{Local, NaiveDateTime};
use scraper::Html;

use crate::cli::ParseArgs;
use crate::crawl::write_meetings;
use crate::response::unwrap_callback_body;
use crate::spider::{DetPoliceDepartment, FEED_URL};

const NOW_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Offline replay over bodies saved by `crawl --raw`. Useful when the
/// site markup changes and the parser needs reworking against fixtures.
pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let now = match &args.now {
        Some(value) => NaiveDateTime::parse_from_str(value, NOW_FORMAT)
            .with_context(|| format!("parse --now (expected {NOW_FORMAT}): {value}"))?,
        None => Local::now().naive_local(),
    };

    let initial = std::fs::read_to_string(&args.initial)
        .with_context(|| format!("read initial page: {}", args.initial))?;
    let body = std::fs::read_to_string(&args.response)
        .with_context(|| format!("read callback response: {}", args.response))?;

    let page = Html::parse_document(&initial);
    let spider = DetPoliceDepartment::new();
    if spider.initial_request(&page, FEED_URL).is_none() {
        tracing::warn!(initial = %args.initial, "no callback declarations found in saved page");
    }

    let doc = unwrap_callback_body(&body);
    let outcomes = spider.parse_meetings(&doc, now);

    write_meetings(&PathBuf::from(&args.out), &outcomes)
}
