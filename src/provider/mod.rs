//! Catalog providers.
//!
//! - [`PlayStore`]: HTML detail page, scraped with CSS selectors
//! - [`AppStore`]: JSON catalog API, read through fixed JSON pointers
//!
//! Both fetch through a [`RedirectFetcher`] and require a `200 OK`.

pub mod app_store;
pub mod play_store;

pub use app_store::AppStore;
pub use play_store::PlayStore;

use std::sync::Arc;
use std::time::Duration;

use crate::app::Result;
use crate::config::{APP_STORE_URL, PLAY_STORE_URL};
use crate::domain::AppInfo;
use crate::fetcher::{HttpTransport, RedirectFetcher};

/// Fetch a Play Store app by bundle id using the default transport.
pub async fn fetch_play_store(id: &str, timeout: Duration) -> Result<AppInfo> {
    let fetcher = RedirectFetcher::new(Arc::new(HttpTransport::new()?));
    PlayStore::new(fetcher, PLAY_STORE_URL).fetch(id, timeout).await
}

/// Fetch an App Store app by numeric id using the default transport.
pub async fn fetch_app_store(id: &str, token: &str, timeout: Duration) -> Result<AppInfo> {
    let fetcher = RedirectFetcher::new(Arc::new(HttpTransport::new()?));
    AppStore::new(fetcher, APP_STORE_URL)
        .fetch(id, token, timeout)
        .await
}
