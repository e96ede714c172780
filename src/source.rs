//! Reading sources from disk or over HTTP(S) and turning them into suites.
//!
//! Loading is all-or-nothing: any failing origin fails the whole batch
//! and nothing is retried.

use crate::extract::{extract_suites, Dialect, ExtractError};
use crate::suite::Suite;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

static RE_HTTP_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").unwrap());

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("error reading file \"{origin}\": {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("error reading URL \"{origin}\": {source}")]
    Http {
        origin: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("status={status}, error reading URL \"{origin}\"")]
    Status { origin: String, status: u16 },
    #[error("stop receiving \"{origin}\", size limit ({limit}) reached")]
    TooLarge { origin: String, limit: usize },
    #[error("response from \"{origin}\" was truncated")]
    Truncated { origin: String },
    #[error("\"{origin}\" is not valid UTF-8")]
    NotUtf8 { origin: String },
    #[error("failed to extract tests from \"{origin}\": {source}")]
    Extract {
        origin: String,
        #[source]
        source: ExtractError,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub fn is_url(origin: &str) -> bool {
    RE_HTTP_URL.is_match(origin)
}

/// Retrieval settings for URL origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Hard ceiling on a response body, in bytes.
    pub max_response_bytes: usize,
    /// Applies to each request as a whole.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("stitcher/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Something that can turn an origin into source text.
pub trait SourceReader: Sync {
    fn read(&self, origin: &str) -> Result<String, SourceError>;
}

/// Local files relative to the working directory, plus `http(s)://` URLs.
pub struct DefaultReader {
    client: reqwest::blocking::Client,
    options: FetchOptions,
}

impl DefaultReader {
    pub fn new(options: FetchOptions) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(SourceError::Client)?;
        Ok(Self { client, options })
    }

    fn read_file(&self, origin: &str) -> Result<String, SourceError> {
        std::fs::read_to_string(origin).map_err(|source| match source.kind() {
            std::io::ErrorKind::InvalidData => SourceError::NotUtf8 { origin: origin.to_string() },
            _ => SourceError::Io { origin: origin.to_string(), source },
        })
    }

    fn read_url(&self, origin: &str) -> Result<String, SourceError> {
        let http = |source| SourceError::Http { origin: origin.to_string(), source };
        let mut response = self.client.get(origin).send().map_err(http)?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(SourceError::Status { origin: origin.to_string(), status: status.as_u16() });
        }
        let body = read_limited(&mut response, origin, self.options.max_response_bytes)?;
        String::from_utf8(body).map_err(|_| SourceError::NotUtf8 { origin: origin.to_string() })
    }
}

impl SourceReader for DefaultReader {
    fn read(&self, origin: &str) -> Result<String, SourceError> {
        if is_url(origin) { self.read_url(origin) } else { self.read_file(origin) }
    }
}

/// Reads a body while enforcing `max_bytes`.
pub fn read_limited<R: Read>(response: &mut R, origin: &str, max_bytes: usize) -> Result<Vec<u8>, SourceError>
where
    R: ContentLength,
{
    let too_large = || SourceError::TooLarge { origin: origin.to_string(), limit: max_bytes };
    let expected = response.content_length();
    if let Some(expected) = expected {
        if expected > max_bytes as u64 {
            return Err(too_large());
        }
    }
    let mut buf = Vec::new();
    response
        .take((max_bytes as u64).saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|source| SourceError::Io { origin: origin.to_string(), source })?;
    if buf.len() > max_bytes {
        return Err(too_large());
    }
    if let Some(expected) = expected {
        if (buf.len() as u64) < expected {
            return Err(SourceError::Truncated { origin: origin.to_string() });
        }
    }
    Ok(buf)
}

/// Bodies that may announce their length up front.
pub trait ContentLength {
    fn content_length(&self) -> Option<u64>;
}

impl ContentLength for reqwest::blocking::Response {
    fn content_length(&self) -> Option<u64> {
        reqwest::blocking::Response::content_length(self)
    }
}

/// Reads one origin, extracts its suites and tags the result with the origin.
pub fn load_suite<R: SourceReader + ?Sized>(reader: &R, origin: &str) -> Result<Suite, SourceError> {
    let text = reader.read(origin)?;
    let mut suite = extract_suites(&text, Dialect::from_origin(origin))
        .map_err(|source| SourceError::Extract { origin: origin.to_string(), source })?;
    suite.origin = origin.to_string();
    Ok(suite)
}

/// Loads every origin in parallel. Suites come back in input order; any
/// failure fails the whole batch, reported as the earliest failing origin
/// in input order.
pub fn load_all<R, S>(reader: &R, origins: &[S]) -> Result<Vec<Suite>, SourceError>
where
    R: SourceReader + ?Sized,
    S: AsRef<str> + Sync,
{
    let loaded: Vec<Result<Suite, SourceError>> =
        origins.par_iter().map(|origin| load_suite(reader, origin.as_ref())).collect();
    loaded.into_iter().collect()
}
