use serde::{Deserialize, Serialize};

/// Summary record for a film as returned by list and search endpoints.
///
/// Field names match the remote payload so the same value can be persisted
/// as a favorite snapshot and read back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Remote identifier, unique per film
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// `YYYY-MM-DD`, may be empty for unreleased titles
    #[serde(default)]
    pub release_date: String,
    /// Average vote on a 0-10 scale
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub video: bool,
}

impl Movie {
    /// Create a movie with the required fields, everything else empty
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id,
            original_title: title.clone(),
            title,
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: String::new(),
            vote_average: 0.0,
            vote_count: 0,
            genre_ids: Vec::new(),
            adult: false,
            original_language: String::new(),
            popularity: 0.0,
            video: false,
        }
    }

    /// Builder pattern: set overview
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    /// Builder pattern: set poster path
    pub fn with_poster(mut self, path: Option<String>) -> Self {
        self.poster_path = path;
        self
    }

    /// Builder pattern: set backdrop path
    pub fn with_backdrop(mut self, path: Option<String>) -> Self {
        self.backdrop_path = path;
        self
    }

    /// Builder pattern: set release date
    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = date.into();
        self
    }

    /// Builder pattern: set vote average and count
    pub fn with_votes(mut self, average: f64, count: u32) -> Self {
        self.vote_average = average;
        self.vote_count = count;
        self
    }

    /// Builder pattern: set popularity
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }

    /// Release year parsed from `release_date`
    pub fn release_year(&self) -> Option<i32> {
        crate::catalog::format::release_year(&self.release_date)
    }
}

#[cfg(test)]
mod tests {
    use super::Movie;

    #[test]
    fn test_movie_deserializes_with_nulls() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "overview": "An insomniac office worker...",
            "poster_path": null,
            "backdrop_path": "/bg.jpg",
            "release_date": "1999-10-15",
            "vote_average": 8.4,
            "vote_count": 27000,
            "genre_ids": [18],
            "adult": false,
            "original_language": "en",
            "original_title": "Fight Club",
            "popularity": 61.4,
            "video": false
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();

        assert_eq!(movie.id, 550);
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.backdrop_path.as_deref(), Some("/bg.jpg"));
        assert_eq!(movie.genre_ids, vec![18]);
        assert_eq!(movie.release_year(), Some(1999));
    }

    #[test]
    fn test_movie_tolerates_missing_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 7, "title": "Untitled"}"#).unwrap();

        assert_eq!(movie.id, 7);
        assert!(movie.release_date.is_empty());
        assert_eq!(movie.release_year(), None);
    }
}
