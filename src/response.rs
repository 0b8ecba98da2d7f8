use scraper::{Html, Selector};

/// The call-back endpoint returns the rendered section as literal HTML
/// text inside a textarea wrapper rather than as part of the document
/// tree. Pull that text out and re-parse it as a standalone document so
/// table and row selectors apply directly.
///
/// A body without the wrapper degrades to an empty document, which
/// yields zero rows downstream.
pub fn unwrap_callback_body(body: &str) -> Html {
    let outer = Html::parse_document(body);
    let wrapper = Selector::parse("textarea").expect("static selector");

    let inner = outer
        .select(&wrapper)
        .next()
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default();

    Html::parse_document(&inner)
}
