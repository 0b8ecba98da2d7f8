use chrono::{NaiveDateTime, Timelike as _};
use scraper::{ElementRef, Html, Selector};

use crate::callback::extract_callbacks;
use crate::events::{EventStatus, EventTime, Location, Meeting, Source, slugify};
use crate::request::{FormRequest, build_callback_request};

pub const SPIDER_NAME: &str = "det_police_department";
pub const FEED_NAME: &str = "Detroit Police Commissioners Meetings";
pub const FEED_URL: &str =
    "http://www.detroitmi.gov/Government/Detroit-Police-Commissioners-Meetings";

const CLASSIFICATION: &str = "Board";
const HQ_NAME: &str = "Detroit Public Safety Headquarters";
const HQ_ADDRESS: &str = "1301 3rd Ave, Detroit, MI 48226";

/// Combined date/time cell, e.g. `January 4, 2018 3:00 PM`.
const DATE_TIME_FORMAT: &str = "%B %d, %Y %I:%M %p";

/// Outcome of one table row. Unparsable rows are surfaced instead of
/// silently dropped so callers can log or count them.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Parsed(Meeting),
    Skipped { reason: String },
}

/// Parser for the police commissioners meeting schedule. Stateless;
/// construct one per crawl.
#[derive(Debug, Default)]
pub struct DetPoliceDepartment;

impl DetPoliceDepartment {
    pub fn new() -> Self {
        Self
    }

    /// Builds the single follow-up request that expands the first
    /// discoverable accordion section, posted back to the page it was
    /// fetched from. `None` when the page carries no call-back
    /// declarations.
    pub fn initial_request(&self, page: &Html, page_url: &str) -> Option<FormRequest> {
        let callbacks = extract_callbacks(page);
        let (key, decl) = callbacks.iter().next()?;
        tracing::debug!(
            %key,
            section = %decl.section,
            callback_id = decl.callback_id,
            "selected callback section"
        );

        Some(build_callback_request(page, page_url, decl))
    }

    /// Walks the data rows of an unwrapped call-back response. The first
    /// row is the table header.
    pub fn parse_meetings(&self, doc: &Html, now: NaiveDateTime) -> Vec<RowOutcome> {
        let row = Selector::parse("tr").expect("static selector");
        doc.select(&row)
            .skip(1)
            .map(|element| self.parse_row(element, now))
            .collect()
    }

    fn parse_row(&self, row: ElementRef<'_>, now: NaiveDateTime) -> RowOutcome {
        let cell = Selector::parse("td").expect("static selector");
        let mut cells = row.select(&cell);

        let Some(when) = cells.next().map(cell_text) else {
            return RowOutcome::Skipped {
                reason: "row has no cells".to_owned(),
            };
        };
        let start = match NaiveDateTime::parse_from_str(&when, DATE_TIME_FORMAT) {
            Ok(start) => start,
            Err(err) => {
                return RowOutcome::Skipped {
                    reason: format!("unparsable date cell {when:?}: {err}"),
                };
            }
        };
        let event_description = cells.next().map(cell_text).unwrap_or_default();

        let status = if start < now {
            EventStatus::Passed
        } else {
            EventStatus::Tentative
        };

        RowOutcome::Parsed(Meeting {
            name: FEED_NAME.to_owned(),
            event_description,
            start: EventTime {
                date: Some(start.date()),
                time: Some(start.time()),
                note: String::new(),
            },
            end: EventTime::empty(),
            id: meeting_id(&start),
            status,
            location: location_for(&start),
            sources: vec![Source {
                url: FEED_URL.to_owned(),
                note: String::new(),
            }],
            all_day: false,
            classification: CLASSIFICATION.to_owned(),
            item_type: "event".to_owned(),
        })
    }
}

/// Board meetings at exactly 15:00 are held at headquarters; every other
/// time on the schedule is a community meeting with no fixed address.
fn location_for(start: &NaiveDateTime) -> Location {
    if (start.hour(), start.minute()) == (15, 0) {
        Location {
            neighborhood: String::new(),
            name: HQ_NAME.to_owned(),
            address: HQ_ADDRESS.to_owned(),
        }
    } else {
        Location {
            neighborhood: String::new(),
            name: "Community".to_owned(),
            address: String::new(),
        }
    }
}

fn meeting_id(start: &NaiveDateTime) -> String {
    format!(
        "{SPIDER_NAME}/{}/x/{}",
        start.format("%Y%m%d%H%M"),
        slugify(FEED_NAME)
    )
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_owned()
}
