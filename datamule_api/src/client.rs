//! HTTP client for the datamule indicator CSV files.

use std::time::Duration;

use url::Url;

use crate::Error;

/// Where the `format1` indicator files live. Catalog sources are relative to this.
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/john-friedman/datamule-indicators/main/indicators/format1/";

/// Upper bound on a single fetch, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("widgetboard/", env!("CARGO_PKG_VERSION"));

/// HTTP client for remote CSV sources and JSON feeds.
///
/// One attempt per call, no retries and no caching. Cloning is cheap and
/// shares the underlying connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Base that relative sources are joined onto. Always ends with `/`.
    base_url: Url,
    timeout: Duration,
}

impl Client {
    /// Creates a client pointing at the public datamule indicator repository.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Creates a client with a custom base URL. Used for mirrors and for testing with wiremock.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let base_url = parse_base(base_url)?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a catalog source against the base URL. Absolute URLs pass through.
    pub fn resolve(&self, source: &str) -> Result<Url, Error> {
        self.base_url.join(source).map_err(|e| {
            tracing::error!("Invalid source '{}': {}", source, e);
            Error::InvalidUrl(format!("{}: {}", source, e))
        })
    }

    /// Fetches a CSV source and returns the body as text.
    ///
    /// Only a 2xx response counts as success; anything else, including a
    /// timeout, is an [`Error`].
    pub async fn fetch_csv(&self, source: &str) -> Result<String, Error> {
        let url = self.resolve(source)?;
        self.get_text(url, "text/csv, text/plain;q=0.9, */*;q=0.8")
            .await
    }

    /// Fetches an absolute URL and parses the body as JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, Error> {
        let url = Url::parse(url).map_err(|e| {
            tracing::error!("Invalid URL '{}': {}", url, e);
            Error::InvalidUrl(format!("{}: {}", url, e))
        })?;
        let body = self.get_text(url, "application/json").await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse JSON: {} | body: {}", e, truncate_body(&body));
            Error::InvalidBody(e.to_string())
        })
    }

    async fn get_text(&self, url: Url, accept: &str) -> Result<String, Error> {
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url.clone())
            .header("accept", accept)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get {}: {}", url, e);
                Error::RequestFailed(describe(&e, self.timeout))
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body from {}: {}", url, e);
            Error::RequestFailed(describe(&e, self.timeout))
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("GET {} failed with status {}: {}", url, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }
}

fn parse_base(base_url: &str) -> Result<Url, Error> {
    let mut base = base_url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))
}

fn describe(e: &reqwest::Error, timeout: Duration) -> String {
    if e.is_timeout() {
        format!("timed out after {}s", timeout.as_secs_f64())
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
