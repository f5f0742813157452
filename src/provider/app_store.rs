use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;

use crate::app::{AppMetaError, Result};
use crate::domain::{AppInfo, Platform};
use crate::fetcher::{FetchRequest, RedirectFetcher};

/// Query string asking the catalog for the extended attribute set.
pub const CATALOG_QUERY: &str = "?platform=web\
&additionalPlatforms=appletv%2Cipad%2Ciphone%2Cmac\
&extend=description%2CdeveloperInfo%2CeditorialVideo%2Ceula%2CfileSizeByDevice%2CmessagesScreenshots%2CprivacyPolicyUrl%2CprivacyPolicyText%2CpromotionalText%2CscreenshotsByType%2CsupportURLForLanguage%2CversionHistory%2CvideoPreviewsByType%2CwebsiteUrl\
&include=genres%2Cdeveloper%2Creviews%2Cmerchandised-in-apps%2Ccustomers-also-bought-apps%2Cdeveloper-other-apps%2Capp-bundles%2Ctop-in-apps%2Ceula\
&l=en-us";

/// Artwork template placeholders and what they are replaced with.
const ICON_SUBSTITUTIONS: [(&str, &str); 4] =
    [("{f}", "png"), ("{w}", "460"), ("{h}", "0"), ("{c}", "w")];

/// Client for the App Store catalog API.
#[derive(Clone)]
pub struct AppStore {
    fetcher: RedirectFetcher,
    base_url: String,
}

impl AppStore {
    pub fn new(fetcher: RedirectFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    pub fn catalog_url(&self, id: &str) -> String {
        format!("{}{}{}", self.base_url, id, CATALOG_QUERY)
    }

    pub async fn fetch(&self, id: &str, token: &str, timeout: Duration) -> Result<AppInfo> {
        let request = FetchRequest::get(self.catalog_url(id))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);

        let response = self.fetcher.fetch(request, timeout).await?;

        if response.status != StatusCode::OK {
            tracing::debug!("App Store returned {} for {}", response.status, id);
            return Err(AppMetaError::BadStatus);
        }

        parse(&response.body, id)
    }
}

/// Extract an [`AppInfo`] from a catalog response.
///
/// Only a body that is not JSON at all is an error. Every field is read from
/// the first entry of `data` and falls back to its empty value.
pub fn parse(body: &[u8], id: &str) -> Result<AppInfo> {
    let document: Value = serde_json::from_slice(body)?;
    let app = document.pointer("/data/0").unwrap_or(&Value::Null);

    let mut info = AppInfo::new(id, Platform::Ios);

    if let Some(genres) = app
        .pointer("/relationships/genres/data")
        .and_then(Value::as_array)
    {
        info.category = genres
            .iter()
            .filter_map(|genre| genre.pointer("/attributes/name").and_then(Value::as_str))
            .map(str::to_lowercase)
            .collect();
    }

    info.icon = rewrite_icon(string_at(app, "/attributes/platformAttributes/ios/artwork/url"));
    info.name = string_at(app, "/attributes/name").to_string();
    info.publisher = string_at(app, "/attributes/artistName").to_string();
    info.url = string_at(app, "/attributes/url").to_string();
    info.rating = app
        .pointer("/attributes/userRating/value")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    Ok(info)
}

/// Fill the artwork template with a fixed format and size.
pub fn rewrite_icon(template: &str) -> String {
    ICON_SUBSTITUTIONS
        .into_iter()
        .fold(template.to_string(), |url, (token, value)| url.replace(token, value))
}

fn string_at<'a>(value: &'a Value, path: &str) -> &'a str {
    value.pointer(path).and_then(Value::as_str).unwrap_or("")
}
