pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Image size tiers served by the image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    W185,
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W185 => "w185",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds image URLs from the path fragments returned by the API
#[derive(Debug, Clone)]
pub struct ImageConfig {
    base_url: String,
}

impl ImageConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `None` when the fragment is absent or empty; callers show a placeholder
    pub fn url(&self, path: Option<&str>, size: ImageSize) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;
        if path.starts_with('/') {
            Some(format!("{}/{size}{path}", self.base_url))
        } else {
            Some(format!("{}/{size}/{path}", self.base_url))
        }
    }

    pub fn poster_url(&self, path: Option<&str>) -> Option<String> {
        self.url(path, ImageSize::W500)
    }

    pub fn backdrop_url(&self, path: Option<&str>) -> Option<String> {
        self.url(path, ImageSize::Original)
    }

    pub fn profile_url(&self, path: Option<&str>) -> Option<String> {
        self.url(path, ImageSize::W185)
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE)
    }
}
