mod http;
pub mod tmdb;
mod traits;

pub use http::HttpClient;
pub use tmdb::TmdbClient;
pub use traits::{DetailPart, MovieApi};

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider base configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Base URL of the image CDN
    pub image_base_url: String,
    /// Language sent with every request
    pub language: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Create new configuration
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: crate::catalog::DEFAULT_IMAGE_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_image_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.image_base_url = base_url.into();
        self
    }

    /// Set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
