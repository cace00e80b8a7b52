use crate::catalog::{
    Result,
    types::{Credits, Movie, MovieDetails, MovieDetailsCore, Video},
};
use async_trait::async_trait;

/// Which detail sub-fetch failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPart {
    Core,
    Credits,
    Videos,
}

impl std::fmt::Display for DetailPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core => write!(f, "movie"),
            Self::Credits => write!(f, "credits"),
            Self::Videos => write!(f, "videos"),
        }
    }
}

/// Remote movie metadata source.
///
/// One call is one attempt; retries are left to the caller.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Popular movies, one page
    async fn fetch_popular(&self, page: u32) -> Result<Vec<Movie>>;

    /// Title search, one page
    async fn search_movies(&self, query: &str, page: u32) -> Result<Vec<Movie>>;

    /// Summary fields plus runtime and genres
    async fn fetch_movie_core(&self, id: i64) -> Result<MovieDetailsCore>;

    async fn fetch_credits(&self, id: i64) -> Result<Credits>;

    async fn fetch_videos(&self, id: i64) -> Result<Vec<Video>>;

    /// Issue the three detail requests together and merge them.
    ///
    /// The first failure aborts the join and drops the other responses, so a
    /// partially assembled value never escapes.
    async fn fetch_movie_details(&self, id: i64) -> Result<MovieDetails> {
        let (core, credits, videos) = tokio::try_join!(
            async { self.fetch_movie_core(id).await.map_err(|e| e.in_part(DetailPart::Core)) },
            async {
                self.fetch_credits(id)
                    .await
                    .map_err(|e| e.in_part(DetailPart::Credits))
            },
            async {
                self.fetch_videos(id)
                    .await
                    .map_err(|e| e.in_part(DetailPart::Videos))
            },
        )?;

        Ok(MovieDetails::assemble(core, credits, videos))
    }
}
