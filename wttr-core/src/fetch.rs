//! Single blocking GET against the wttr.in `j1` endpoint, with a bounded
//! response buffer and a fixed timeout.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::model::CityQuery;

const BASE_URL: &str = "http://wttr.in";
const FORMAT: &str = "j1";
const USER_AGENT: &str = "libcurl-agent/1.0";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum length of the composed request URL, in bytes.
pub const MAX_URL_LEN: usize = 256;

/// Maximum accepted response body size, in bytes.
pub const MAX_BODY_LEN: usize = 65_536;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("URL is too long: {len} bytes (maximum is {MAX_URL_LEN}).")]
    UrlTooLong { len: usize },

    #[error("Response too large to handle (over {limit} bytes).")]
    BodyTooLarge { limit: usize },

    #[error("Response body is not valid UTF-8.")]
    BodyNotUtf8,

    #[error("Failed to read response body: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Byte sink with a hard capacity. A write that would push the total past
/// capacity is rejected whole; nothing of the offending chunk is kept.
#[derive(Debug)]
pub struct BoundedSink {
    buf: Vec<u8>,
    capacity: usize,
}

impl BoundedSink {
    pub fn new(capacity: usize) -> Self {
        Self { buf: Vec::new(), capacity }
    }

    pub fn write(&mut self, chunk: &[u8]) -> Result<(), FetchError> {
        if self.buf.len() + chunk.len() > self.capacity {
            return Err(FetchError::BodyTooLarge { limit: self.capacity });
        }
        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_string(self) -> Result<String, FetchError> {
        String::from_utf8(self.buf).map_err(|_| FetchError::BodyNotUtf8)
    }
}

/// Compose the request URL for a city. The city segment is percent-encoded;
/// an over-length result is an error before any network activity happens.
pub fn compose_url(city: &CityQuery) -> Result<String, FetchError> {
    let url = format!(
        "{BASE_URL}/{}?format={FORMAT}",
        urlencoding::encode(city.as_str())
    );
    if url.len() > MAX_URL_LEN {
        return Err(FetchError::UrlTooLong { len: url.len() });
    }
    Ok(url)
}

/// Perform the single GET for `city` and return the raw body text.
///
/// Exactly one outbound request, a 10 second deadline, no retries. A body
/// larger than [`MAX_BODY_LEN`] fails the fetch rather than being truncated.
pub fn fetch(city: &CityQuery) -> Result<String, FetchError> {
    let url = compose_url(city)?;

    let client = Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;

    let response = client.get(&url).send()?.error_for_status()?;
    read_body(response)
}

fn read_body(mut source: impl Read) -> Result<String, FetchError> {
    let mut sink = BoundedSink::new(MAX_BODY_LEN);
    let mut chunk = [0u8; 8192];

    loop {
        let n = source.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        sink.write(&chunk[..n])?;
    }

    sink.into_string()
}
