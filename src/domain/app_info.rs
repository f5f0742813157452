use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog a record was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized application metadata.
///
/// Only `id` and `platform` are guaranteed; everything else is filled on a
/// best-effort basis and stays empty (or `0.0`) when the source omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub category: Vec<String>,
    pub publisher: String,
    pub url: String,
    pub icon: String,
    pub rating: f64,
}

impl AppInfo {
    pub fn new(id: impl Into<String>, platform: Platform) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            platform,
            category: Vec::new(),
            publisher: String::new(),
            url: String::new(),
            icon: String::new(),
            rating: 0.0,
        }
    }
}
