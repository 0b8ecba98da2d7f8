use std::collections::BTreeMap;

use regex::Regex;
use scraper::{Html, Selector};

/// One `dnn.xmlhttp.doCallBack` declaration lifted from the page scripts.
///
/// The DotNetNuke page registers one declaration per collapsed accordion
/// section; expanding a section server-side requires posting the section
/// identifier and the call-back id back to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackDecl {
    /// Element id the call-back renders into, e.g.
    /// `dnn_ctr7392_FAQs_lstFAQs_A2_0`.
    pub target: String,
    /// Value for the `__DNNCAPISCI` form field.
    pub section: String,
    /// Value for the `__DNNCAPISCP` form field.
    pub callback_id: u32,
}

const DECL_PATTERN: &str =
    r#"ClientCallBackRef(?P<target>\w+)\s*=\s*"dnn\.xmlhttp\.doCallBack\('(?P<section>[^']*)',(?P<id>\d+),"#;

/// Scans the page scripts for call-back declarations, keyed by the
/// question id each answer target belongs to. Pages without declarations
/// (or with malformed ones) yield an empty map.
pub fn extract_callbacks(page: &Html) -> BTreeMap<String, CallbackDecl> {
    let decl = Regex::new(DECL_PATTERN).expect("valid declaration pattern");
    let script = Selector::parse("script").expect("static selector");

    let mut callbacks = BTreeMap::new();
    for element in page.select(&script) {
        let text = element.text().collect::<String>();
        for capture in decl.captures_iter(&text) {
            let Ok(callback_id) = capture["id"].parse::<u32>() else {
                continue;
            };
            let target = capture["target"].to_owned();
            callbacks.insert(
                question_key(&target),
                CallbackDecl {
                    target,
                    section: capture["section"].to_owned(),
                    callback_id,
                },
            );
        }
    }

    callbacks
}

/// The page renders answers under `…_A<n>_<m>` ids while the form state
/// is tracked against the matching question id, so swap the marker.
fn question_key(target: &str) -> String {
    match target.rfind("_A") {
        Some(idx) => format!("{}_Q{}", &target[..idx], &target[idx + 2..]),
        None => target.to_owned(),
    }
}
