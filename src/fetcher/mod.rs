pub mod http_fetcher;
pub mod redirect;

use std::borrow::Cow;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, LOCATION};
use reqwest::{Method, StatusCode};

use crate::app::Result;

pub use http_fetcher::HttpTransport;
pub use redirect::{RedirectFetcher, MAX_REDIRECTS};

/// A single outbound request. `uri` is rewritten as redirects are followed.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
}

impl FetchRequest {
    pub fn get(uri: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            uri: uri.into(),
            headers: HeaderMap::new(),
        }
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A complete response: status, headers and the fully read body.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// 301 through 308 inclusive.
    pub fn is_redirect(&self) -> bool {
        (301..=308).contains(&self.status.as_u16())
    }

    /// The `Location` header, if present.
    ///
    /// Bytes outside ASCII are percent-encoded so a non-UTF-8 value can still
    /// be followed.
    pub fn location(&self) -> Option<Cow<'_, str>> {
        let value = self.headers.get(LOCATION)?;
        if let Ok(location) = value.to_str() {
            return Some(Cow::Borrowed(location));
        }

        let mut encoded = String::with_capacity(value.len());
        for &byte in value.as_bytes() {
            if byte.is_ascii() {
                encoded.push(char::from(byte));
            } else {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        }
        Some(Cow::Owned(encoded))
    }
}

/// Issue one HTTP request and return one HTTP response.
///
/// Implementations must not follow redirects themselves.
#[async_trait]
pub trait Transport {
    async fn execute(&self, request: &FetchRequest) -> Result<FetchResponse>;
}
