use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::app::Result;
use crate::fetcher::{FetchRequest, FetchResponse, Transport};

pub const DEFAULT_USER_AGENT: &str = "appmeta/0.1.0";

/// Hard cutoff for a single exchange. A request abandoned by the redirect
/// fetcher's own timeout keeps running until this fires.
pub const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed transport. Redirects are left to
/// [`RedirectFetcher`](crate::fetcher::RedirectFetcher).
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(TRANSPORT_TIMEOUT)
            .redirect(Policy::none())
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &FetchRequest) -> Result<FetchResponse> {
        let response = self
            .client
            .request(request.method.clone(), request.uri.as_str())
            .headers(request.headers.clone())
            .send()
            .await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        tracing::trace!("{} {} -> {}", request.method, request.uri, status);

        Ok(FetchResponse {
            status,
            headers,
            body,
        })
    }
}
