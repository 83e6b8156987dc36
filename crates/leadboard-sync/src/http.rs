use crate::source::PayloadSource;
use crate::{Result, SyncError};
use leadboard_core::SourceTag;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    endpoint: String,
    token: Option<String>,
    timeout: Duration,
    source: SourceTag,
}

impl HttpSource {
    pub fn new(
        base_url: String,
        endpoint: String,
        token: Option<String>,
        timeout: Duration,
        source: SourceTag,
    ) -> Self {
        Self {
            base_url,
            endpoint,
            token,
            timeout,
            source,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}

impl PayloadSource for HttpSource {
    fn source_tag(&self) -> SourceTag {
        self.source
    }

    fn origin(&self) -> String {
        self.url()
    }

    fn fetch_records(&self) -> Result<Vec<Value>> {
        fetch_json(&self.url(), self.token.as_deref(), self.timeout)
    }
}

#[cfg(feature = "http-sync")]
fn fetch_json(url: &str, token: Option<&str>, timeout: Duration) -> Result<Vec<Value>> {
    use crate::payload::parse_payload;
    use reqwest::blocking::Client;
    use url::Url;

    let url = Url::parse(url)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SyncError::Parse(format!(
            "unsupported url scheme: {}",
            url.scheme()
        )));
    }
    let client = Client::builder()
        .user_agent("leadboard")
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let mut request = client.get(url).header("Accept", "application/json");
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    let body = request.send()?.error_for_status()?.text()?;
    parse_payload(&body)
}

#[cfg(not(feature = "http-sync"))]
fn fetch_json(_url: &str, _token: Option<&str>, _timeout: Duration) -> Result<Vec<Value>> {
    Err(SyncError::Unavailable(
        "fetching from base_url requires the http-sync feature".to_string(),
    ))
}
