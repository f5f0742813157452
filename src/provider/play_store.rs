use std::time::Duration;

use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};

use crate::app::{AppMetaError, Result};
use crate::domain::{AppInfo, Platform};
use crate::fetcher::{FetchRequest, RedirectFetcher};

const CATEGORY_SELECTOR: &str = r#"a[itemprop="genre"]"#;
const NAME_SELECTOR: &str = r#"h1[itemprop="name"] > span"#;
const PUBLISHER_SELECTOR: &str = r#"a[href*="/store/apps/dev"]"#;
const ICON_SELECTOR: &str = r#"img[alt="Cover art"]"#;
const RATING_SELECTOR: &str = "div>div>c-wiz>div>div>div>div>div>c-wiz>div>c-wiz>div>div";

/// Scrapes the Play Store detail page.
#[derive(Clone)]
pub struct PlayStore {
    fetcher: RedirectFetcher,
    base_url: String,
}

impl PlayStore {
    pub fn new(fetcher: RedirectFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn detail_url(&self, id: &str) -> String {
        format!("{}{}", self.base_url, id)
    }

    pub async fn fetch(&self, id: &str, timeout: Duration) -> Result<AppInfo> {
        let url = self.detail_url(id);
        let response = self
            .fetcher
            .fetch(FetchRequest::get(url.as_str()), timeout)
            .await?;

        if response.status != StatusCode::OK {
            tracing::debug!("Play Store returned {} for {}", response.status, id);
            return Err(AppMetaError::BadStatus);
        }

        parse(&response.body, id, &url)
    }
}

/// Extract an [`AppInfo`] from a detail page.
///
/// Fields are looked up independently; a selector with no matches leaves the
/// field empty. For every field except the rating the last match wins.
/// Bytes that are not UTF-8 are replaced rather than rejected.
pub fn parse(body: &[u8], id: &str, url: &str) -> Result<AppInfo> {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    let mut info = AppInfo::new(id, Platform::Android);
    info.url = url.to_string();

    for genre in document.select(&selector(CATEGORY_SELECTOR)?) {
        info.category = text(genre)
            .to_lowercase()
            .split(',')
            .map(String::from)
            .collect();
    }

    for name in document.select(&selector(NAME_SELECTOR)?) {
        info.name = text(name);
    }

    for publisher in document.select(&selector(PUBLISHER_SELECTOR)?) {
        info.publisher = text(publisher);
    }

    for icon in document.select(&selector(ICON_SELECTOR)?) {
        if let Some(src) = icon.value().attr("src") {
            info.icon = src.to_string();
        }
    }

    // first match only
    if let Some(rating) = document.select(&selector(RATING_SELECTOR)?).next() {
        info.rating = text(rating).parse().unwrap_or(0.0);
    }

    Ok(info)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AppMetaError::MarkupParse(format!("{css}: {e}")))
}

fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
