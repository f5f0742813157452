use std::sync::Arc;

use crate::app::Result;
use crate::config::Settings;
use crate::domain::{AppInfo, Platform};
use crate::fetcher::http_fetcher::DEFAULT_USER_AGENT;
use crate::fetcher::{HttpTransport, RedirectFetcher, Transport};
use crate::provider::{AppStore, PlayStore};

/// Guess the catalog from the identifier's shape.
///
/// Dotted bundle ids (`com.example.app`) belong to the Play Store, anything
/// else (`359917414`) to the App Store. Nothing is validated here.
pub fn classify(id: &str) -> Platform {
    if id.contains('.') {
        Platform::Android
    } else {
        Platform::Ios
    }
}

/// Entry point: one identifier in, one [`AppInfo`] out.
pub struct Resolver {
    settings: Settings,
    play_store: PlayStore,
    app_store: AppStore,
}

impl Resolver {
    pub fn new(settings: Settings) -> Result<Self> {
        let user_agent = settings.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport = HttpTransport::with_user_agent(user_agent)?;
        Ok(Self::with_transport(settings, Arc::new(transport)))
    }

    pub fn with_transport(settings: Settings, transport: Arc<dyn Transport + Send + Sync>) -> Self {
        let fetcher = RedirectFetcher::new(transport);
        let play_store = PlayStore::new(fetcher.clone(), settings.play_store_url.as_str());
        let app_store = AppStore::new(fetcher, settings.app_store_url.as_str());

        Self {
            settings,
            play_store,
            app_store,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn resolve(&self, id: &str) -> Result<AppInfo> {
        let platform = classify(id);
        tracing::debug!("resolving {} via {}", id, platform);

        match platform {
            Platform::Android => self.play_store.fetch(id, self.settings.timeout()).await,
            Platform::Ios => {
                self.app_store
                    .fetch(id, self.settings.app_store_token(), self.settings.timeout())
                    .await
            }
        }
    }

    pub fn play_store(&self) -> &PlayStore {
        &self.play_store
    }

    pub fn app_store(&self) -> &AppStore {
        &self.app_store
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;

    use super::*;
    use crate::app::AppMetaError;
    use crate::fetcher::{FetchRequest, FetchResponse};

    #[test]
    fn test_classify_dotted_ids_as_android() {
        assert_eq!(classify("com.example.app"), Platform::Android);
        assert_eq!(classify("scratch.lucky.money.free.real.big.win"), Platform::Android);
        assert_eq!(classify("a."), Platform::Android);
    }

    #[test]
    fn test_classify_plain_ids_as_ios() {
        assert_eq!(classify("359917414"), Platform::Ios);
        assert_eq!(classify(""), Platform::Ios);
        assert_eq!(classify("not-numeric"), Platform::Ios);
    }

    /// Answers every request with one body and remembers the URIs.
    struct Recording {
        body: &'static str,
        uris: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for Recording {
        async fn execute(&self, request: &FetchRequest) -> Result<FetchResponse> {
            self.uris.lock().unwrap().push(request.uri.clone());
            Ok(FetchResponse {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    fn resolver(body: &'static str) -> (Resolver, Arc<Recording>) {
        let transport = Arc::new(Recording {
            body,
            uris: Mutex::new(Vec::new()),
        });
        let settings = Settings::default()
            .with_timeout(Duration::from_secs(1))
            .with_play_store_url("https://play.test/details?id=")
            .with_app_store_url("https://apps.test/apps/");
        (Resolver::with_transport(settings, transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_resolve_routes_dotted_id_to_play_store() {
        let (resolver, transport) = resolver("<html><body></body></html>");
        let info = resolver.resolve("com.example.app").await.unwrap();

        assert_eq!(info.platform, Platform::Android);
        assert_eq!(info.url, "https://play.test/details?id=com.example.app");
        assert_eq!(
            transport.uris.lock().unwrap().as_slice(),
            ["https://play.test/details?id=com.example.app"]
        );
    }

    #[tokio::test]
    async fn test_resolve_routes_numeric_id_to_app_store() {
        let (resolver, transport) = resolver(r#"{"data":[]}"#);
        let info = resolver.resolve("359917414").await.unwrap();

        assert_eq!(info.platform, Platform::Ios);
        assert_eq!(info.id, "359917414");
        assert!(transport.uris.lock().unwrap()[0].starts_with("https://apps.test/apps/359917414?"));
    }

    #[tokio::test]
    async fn test_resolve_surfaces_extraction_errors() {
        let (resolver, _) = resolver("<html></html>");
        let err = resolver.resolve("359917414").await.unwrap_err();
        assert!(matches!(err, AppMetaError::Json(_)));
    }
}
