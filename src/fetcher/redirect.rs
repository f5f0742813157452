use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use url::Url;

use crate::app::{AppMetaError, Result};
use crate::fetcher::{FetchRequest, FetchResponse, Transport};
use crate::timer::TimerPool;

/// Redirect hops followed before giving up. The loop runs while the hop
/// counter is `<= MAX_REDIRECTS`, so up to `MAX_REDIRECTS + 1` exchanges.
pub const MAX_REDIRECTS: usize = 10;

/// Follows redirects by hand under one deadline for the whole chain.
#[derive(Clone)]
pub struct RedirectFetcher {
    transport: Arc<dyn Transport + Send + Sync>,
    timers: Arc<TimerPool>,
}

impl RedirectFetcher {
    pub fn new(transport: Arc<dyn Transport + Send + Sync>) -> Self {
        Self {
            transport,
            timers: Arc::new(TimerPool::new()),
        }
    }

    /// Fetch `request`, following redirects, failing if no final response
    /// arrives within `timeout`.
    ///
    /// The exchange runs on a spawned task. When the timer wins, that task is
    /// abandoned rather than aborted: it runs on until the transport returns
    /// (bounded only by the transport's own timeout) and its result is
    /// dropped. Under a hanging upstream this leaks one task and connection
    /// per timed out call.
    pub async fn fetch(&self, request: FetchRequest, timeout: Duration) -> Result<FetchResponse> {
        let mut timer = self.timers.acquire(timeout);

        let (tx, rx) = oneshot::channel();
        let transport = self.transport.clone();
        tokio::spawn(async move {
            // Receiver is gone once the timer has won.
            let _ = tx.send(follow_redirects(transport.as_ref(), request).await);
        });

        tokio::select! {
            result = rx => result.unwrap_or_else(|_| {
                Err(AppMetaError::Other("fetch task ended without a result".into()))
            }),
            _ = &mut *timer => {
                tracing::debug!("fetch exceeded {:?}; abandoning in-flight request", timeout);
                Err(AppMetaError::Timeout)
            }
        }
    }
}

async fn follow_redirects(
    transport: &(dyn Transport + Send + Sync),
    mut request: FetchRequest,
) -> Result<FetchResponse> {
    let mut target = request.uri.clone();
    let mut redirects = 0;

    while redirects <= MAX_REDIRECTS {
        request.uri = target.clone();

        let response = transport.execute(&request).await?;
        if !response.is_redirect() {
            return Ok(response);
        }

        match response.location() {
            Some(location) => {
                target = resolve_location(&target, &location)?;
                redirects += 1;
                tracing::debug!("redirect {} ({}) -> {}", redirects, response.status, target);
            }
            None => break,
        }
    }

    Err(AppMetaError::TooManyRedirects)
}

/// Resolve a `Location` value against the URI that produced it.
fn resolve_location(current: &str, location: &str) -> Result<String> {
    let base = Url::parse(current)?;
    Ok(base.join(location)?.to_string())
}
