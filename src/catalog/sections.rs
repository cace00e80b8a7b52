use super::Movie;

/// Views over the popular list used by the home and "see all" screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovieSection {
    Trending,
    Recommended,
    Latest,
    TopRated,
    #[default]
    All,
}

impl MovieSection {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Trending => "Trending Now",
            Self::Recommended => "Recommended",
            Self::Latest => "Latest Movies",
            Self::TopRated => "Top Rated Movies",
            Self::All => "All Movies",
        }
    }

    /// Parse the route parameter used by the "see all" screen.
    /// Unknown values fall back to `All`.
    pub fn from_route(value: &str) -> Self {
        match value {
            "trending" => Self::Trending,
            "recommended" => Self::Recommended,
            "latest" => Self::Latest,
            "top-rated" => Self::TopRated,
            _ => Self::All,
        }
    }

    const fn range(self) -> Option<(usize, usize)> {
        match self {
            Self::Trending => Some((0, 10)),
            Self::Recommended => Some((10, 20)),
            Self::Latest => Some((0, 20)),
            Self::TopRated => Some((10, 30)),
            Self::All => None,
        }
    }

    /// Slice of `movies` for this section, clamped to what is available
    pub fn select(self, movies: &[Movie]) -> &[Movie] {
        match self.range() {
            Some((start, end)) => {
                let end = end.min(movies.len());
                let start = start.min(end);
                &movies[start..end]
            }
            None => movies,
        }
    }
}

impl std::fmt::Display for MovieSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
