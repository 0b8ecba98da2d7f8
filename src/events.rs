use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One scraped meeting in the civic events schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub name: String,
    pub event_description: String,
    pub start: EventTime,
    pub end: EventTime,
    pub id: String,
    pub status: EventStatus,
    pub location: Location,
    pub sources: Vec<Source>,
    pub all_day: bool,
    pub classification: String,
    #[serde(rename = "_type")]
    pub item_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTime {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub note: String,
}

impl EventTime {
    /// Source rows never encode an end time.
    pub fn empty() -> Self {
        Self {
            date: None,
            time: None,
            note: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub neighborhood: String,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    pub note: String,
}

/// Derived by comparing the meeting start to the processing clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Passed,
    Tentative,
}

/// Lowercases the input and squeezes every non-alphanumeric run into a
/// single underscore.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_owned()
}
