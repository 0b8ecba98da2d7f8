use std::fs::OpenOptions;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Local;
use scraper::Html;

use crate::cli::CrawlArgs;
use crate::fetch::Client;
use crate::response::unwrap_callback_body;
use crate::spider::{DetPoliceDepartment, RowOutcome};

pub fn run(args: CrawlArgs) -> anyhow::Result<()> {
    let out_path = PathBuf::from(&args.out);
    let raw_dir = args.raw.as_ref().map(PathBuf::from);
    if let Some(dir) = &raw_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create raw snapshot dir: {}", dir.display()))?;
    }

    let client = Client::new()?;
    let initial = client.fetch_page(&args.url).context("fetch initial page")?;
    if let Some(dir) = &raw_dir {
        write_raw(dir, "initial.html", &initial)?;
    }

    let page = Html::parse_document(&initial);
    let spider = DetPoliceDepartment::new();

    let outcomes = match spider.initial_request(&page, &args.url) {
        Some(request) => {
            tracing::debug!(
                prev_call_count = request.prev_call_count,
                url = %request.url,
                "submitting callback request"
            );
            let body = client.submit(&request).context("submit callback request")?;
            if let Some(dir) = &raw_dir {
                write_raw(dir, "callback.html", &body)?;
            }

            let doc = unwrap_callback_body(&body);
            spider.parse_meetings(&doc, Local::now().naive_local())
        }
        None => {
            tracing::warn!(url = %args.url, "no callback declarations found on page");
            Vec::new()
        }
    };

    write_meetings(&out_path, &outcomes)
}

/// Writes parsed meetings as JSON Lines; skipped rows are logged and
/// counted, never written.
pub(crate) fn write_meetings(out_path: &Path, outcomes: &[RowOutcome]) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(out_path)
        .with_context(|| format!("create output file: {}", out_path.display()))?;
    let mut out = BufWriter::new(file);

    let mut parsed = 0_usize;
    let mut skipped = 0_usize;
    for outcome in outcomes {
        match outcome {
            RowOutcome::Parsed(meeting) => {
                serde_json::to_writer(&mut out, meeting).context("serialize meeting")?;
                out.write_all(b"\n").context("write meeting newline")?;
                parsed += 1;
            }
            RowOutcome::Skipped { reason } => {
                tracing::debug!(%reason, "skipped row");
                skipped += 1;
            }
        }
    }
    out.flush().context("flush output file")?;

    tracing::info!(parsed, skipped, out = %out_path.display(), "wrote meetings");
    Ok(())
}

fn write_raw(dir: &Path, name: &str, body: &str) -> anyhow::Result<()> {
    let path = dir.join(name);
    if path.exists() {
        anyhow::bail!("raw snapshot already exists: {}", path.display());
    }
    std::fs::write(&path, body)
        .with_context(|| format!("write raw snapshot: {}", path.display()))?;

    Ok(())
}
