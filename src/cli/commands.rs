use std::time::Duration;

use crate::app::{AppMetaError, Resolver, Result};
use crate::cli::Cli;
use crate::config::Settings;
use crate::domain::AppInfo;

/// Config file (explicit path or the default location) overlaid with flags.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let loaded = match &cli.config {
        Some(path) => Settings::load(path),
        None => Settings::load_default(),
    };
    let mut settings = loaded.map_err(|e| AppMetaError::Config(e.to_string()))?;

    if let Some(ms) = cli.timeout_ms {
        settings = settings.with_timeout(Duration::from_millis(ms));
    }
    if let Some(token) = &cli.token {
        settings = settings.with_app_store_token(token.as_str());
    }

    Ok(settings)
}

pub async fn resolve(resolver: &Resolver, id: &str) -> Result<()> {
    let info = resolver.resolve(id).await?;
    print_info(&info)
}

pub async fn play_store(resolver: &Resolver, id: &str) -> Result<()> {
    let timeout = resolver.settings().timeout();
    let info = resolver.play_store().fetch(id, timeout).await?;
    print_info(&info)
}

pub async fn app_store(resolver: &Resolver, id: &str) -> Result<()> {
    let settings = resolver.settings();
    let info = resolver
        .app_store()
        .fetch(id, settings.app_store_token(), settings.timeout())
        .await?;
    print_info(&info)
}

fn print_info(info: &AppInfo) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(info)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_ms = 800\napp_store_token = \"from-file\"").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from([
            "appmeta",
            "--config",
            path,
            "--token",
            "from-flag",
            "resolve",
            "1",
        ])
        .unwrap();
        let settings = load_settings(&cli).unwrap();

        assert_eq!(settings.timeout_ms, 800);
        assert_eq!(settings.app_store_token(), "from-flag");
    }

    #[test]
    fn test_timeout_flag() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["appmeta", "-c", path, "-t", "2500", "resolve", "1"]).unwrap();
        let settings = load_settings(&cli).unwrap();

        assert_eq!(settings.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_bad_config_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_ms = [").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["appmeta", "--config", path, "resolve", "1"]).unwrap();
        assert!(matches!(load_settings(&cli), Err(AppMetaError::Config(_))));
    }
}
