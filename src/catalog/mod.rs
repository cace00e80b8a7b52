pub mod format;
mod images;
mod provider;
mod sections;
mod types;


pub use images::{DEFAULT_IMAGE_BASE, ImageConfig, ImageSize};
pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DetailPart, HttpClient, MovieApi, ProviderConfig, TmdbClient,
};
pub use sections::MovieSection;
pub use types::{Cast, Credits, CrewMember, Genre, Movie, MovieDetails, MovieDetailsCore, Video};

/// Catalog result type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog error types
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Network unreachable, connection reset, timeout
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// One of the parallel detail sub-fetches failed; the others were discarded
    #[error("Detail fetch failed at {part}: {source}")]
    CompositeFetch {
        part: DetailPart,
        #[source]
        source: Box<CatalogError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Whether the failure happened below HTTP (no response received)
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::CompositeFetch { source, .. } => source.is_transport(),
            _ => false,
        }
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::CompositeFetch { source, .. } => source.status(),
            _ => None,
        }
    }

    pub(crate) fn in_part(self, part: DetailPart) -> Self {
        Self::CompositeFetch {
            part,
            source: Box::new(self),
        }
    }
}
