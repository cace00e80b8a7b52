use super::Movie;
use serde::{Deserialize, Serialize};

/// Genre id and display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Cast member with the character they play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Crew member and their job title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub job: String,
}

/// Cast and crew of one movie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<Cast>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Externally hosted video (trailer, teaser, clip...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    /// Site-specific key, e.g. the YouTube video id
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
}

impl Video {
    fn is_youtube(&self) -> bool {
        self.site.eq_ignore_ascii_case("YouTube")
    }

    /// Watch URL for YouTube-hosted videos
    pub fn watch_url(&self) -> Option<String> {
        self.is_youtube()
            .then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }
}

/// Payload of the single-movie endpoint: summary fields plus runtime and genres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetailsCore {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Full record behind the detail page.
///
/// Built only from three successful sub-fetches; never patched afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
    pub credits: Credits,
    pub videos: Vec<Video>,
}

impl MovieDetails {
    /// Merge the three detail payloads into one value
    pub fn assemble(core: MovieDetailsCore, credits: Credits, videos: Vec<Video>) -> Self {
        Self {
            movie: core.movie,
            runtime: core.runtime,
            genres: core.genres,
            credits,
            videos,
        }
    }

    pub fn id(&self) -> i64 {
        self.movie.id
    }

    /// Summary snapshot suitable for the favorite set
    pub fn to_movie(&self) -> Movie {
        let mut movie = self.movie.clone();
        if movie.genre_ids.is_empty() {
            movie.genre_ids = self.genres.iter().map(|g| g.id).collect();
        }
        movie
    }

    pub fn top_cast(&self, max: usize) -> &[Cast] {
        let end = max.min(self.credits.cast.len());
        &self.credits.cast[..end]
    }

    pub fn top_crew(&self, max: usize) -> &[CrewMember] {
        let end = max.min(self.credits.crew.len());
        &self.credits.crew[..end]
    }

    pub fn directors(&self) -> Vec<&str> {
        self.credits
            .crew
            .iter()
            .filter(|c| c.job == "Director")
            .map(|c| c.name.as_str())
            .collect()
    }

    /// First YouTube trailer, falling back to the first YouTube teaser
    pub fn trailer(&self) -> Option<&Video> {
        self.videos
            .iter()
            .find(|v| v.is_youtube() && v.video_type == "Trailer")
            .or_else(|| {
                self.videos
                    .iter()
                    .find(|v| v.is_youtube() && v.video_type == "Teaser")
            })
    }

    pub fn trailer_url(&self) -> Option<String> {
        self.trailer().and_then(Video::watch_url)
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}
