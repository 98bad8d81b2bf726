use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use tracing::debug;
use url::Url;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What a download produced: the http status and the body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Response {
            status: 200,
            body: body.into(),
        }
    }
}

/// Retrieves the bytes behind a url.
///
/// The parser calls this once per manifest document. Timeouts, retries and
/// cancellation are up to the implementation. Any state the caller needs
/// travels with the implementing value, so closures work:
///
/// ```
/// use f4m::networking::{Response, BoxError};
///
/// let downloader = |url: &str| -> Result<Response, BoxError> {
///     Err(format!("offline, cannot fetch {}", url).into())
/// };
/// assert!(f4m::parse_manifest(&downloader, "http://example.com/a.f4m").is_err());
/// ```
pub trait Downloader {
    fn download(&self, url: &str) -> Result<Response, BoxError>;
}

impl<F> Downloader for F
where
    F: Fn(&str) -> Result<Response, BoxError>,
{
    fn download(&self, url: &str) -> Result<Response, BoxError> {
        self(url)
    }
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub accept: String,
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout: Duration::from_secs(30),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
    }
}

/// A [`Downloader`] doing blocking GET requests.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self, BoxError> {
        Self::with_config(HttpConfig::default())
    }

    pub fn with_config(config: HttpConfig) -> Result<Self, BoxError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(HttpDownloader { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<Response, BoxError> {
        let url = Url::parse(url)?;
        let start_time = Instant::now();

        debug!("Sending GET request to: {}", url);
        let response = self.client.get(url.clone()).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();

        debug!(
            "Request to {} completed in {} ms with status {}, received {} bytes",
            url,
            start_time.elapsed().as_millis(),
            status,
            body.len()
        );

        Ok(Response { status, body })
    }
}
