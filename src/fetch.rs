use std::time::Duration;

use anyhow::Context as _;
use reqwest::blocking;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};

use crate::request::FormRequest;

const USER_AGENT_VALUE: &str = "city-scrapers-det/0.1";

/// Blocking HTTP client for the two requests of a crawl cycle.
pub struct Client {
    inner: blocking::Client,
}

impl Client {
    pub fn new() -> anyhow::Result<Self> {
        let inner = blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("build http client")?;

        Ok(Self { inner })
    }

    pub fn fetch_page(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .inner
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url}"))?;

        response.text().with_context(|| format!("read body of {url}"))
    }

    pub fn submit(&self, request: &FormRequest) -> anyhow::Result<String> {
        let url = &request.url;
        let response = self
            .inner
            .post(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(request.body())
            .send()
            .with_context(|| format!("POST {url}"))?
            .error_for_status()
            .with_context(|| format!("POST {url}"))?;

        response.text().with_context(|| format!("read body of {url}"))
    }
}
