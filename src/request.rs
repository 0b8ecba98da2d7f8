use scraper::{Html, Selector};
use url::form_urlencoded;

use crate::callback::CallbackDecl;

/// Follow-up form submission that expands one accordion section, plus
/// the request-scoped call counter a downstream handler reads to detect
/// repeat cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    pub url: String,
    pub fields: Vec<(String, String)>,
    pub prev_call_count: u32,
}

impl FormRequest {
    /// Renders the fields as an `application/x-www-form-urlencoded` body.
    pub fn body(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.fields {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Builds the call-back POST for one section: every hidden form field of
/// the page passed through unchanged, the context counter, and the two
/// call-back identifiers.
pub fn build_callback_request(page: &Html, url: &str, decl: &CallbackDecl) -> FormRequest {
    let mut fields = hidden_fields(page);
    fields.push(("ctx".to_owned(), "1".to_owned()));
    fields.push(("__DNNCAPISCI".to_owned(), decl.section.clone()));
    fields.push(("__DNNCAPISCP".to_owned(), decl.callback_id.to_string()));

    FormRequest {
        url: url.to_owned(),
        fields,
        prev_call_count: 1,
    }
}

fn hidden_fields(page: &Html) -> Vec<(String, String)> {
    let hidden = Selector::parse(r#"input[type="hidden"]"#).expect("static selector");
    page.select(&hidden)
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            let value = input.value().attr("value").unwrap_or_default();
            Some((name.to_owned(), value.to_owned()))
        })
        .collect()
}
