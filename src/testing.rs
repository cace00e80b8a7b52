//! In-process fakes shared by unit tests

use crate::catalog::{
    CatalogError, Cast, Credits, CrewMember, DetailPart, Genre, Movie, MovieApi, MovieDetails,
    MovieDetailsCore, Result, Video,
};
use crate::store::{KeyValueStorage, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn movie(id: i64) -> Movie {
    Movie::new(id, format!("Movie {id}"))
        .with_release_date("2020-01-01")
        .with_poster(Some(format!("/poster-{id}.jpg")))
}

pub fn movies(ids: &[i64]) -> Vec<Movie> {
    ids.iter().map(|id| movie(*id)).collect()
}

pub fn details_for(id: i64) -> MovieDetails {
    MovieDetails::assemble(
        MovieDetailsCore {
            movie: movie(id),
            runtime: Some(110),
            genres: vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }],
        },
        Credits {
            cast: vec![
                Cast {
                    id: 1,
                    name: "Lead".to_string(),
                    character: "Hero".to_string(),
                    profile_path: None,
                },
                Cast {
                    id: 2,
                    name: "Support".to_string(),
                    character: "Friend".to_string(),
                    profile_path: Some("/s.jpg".to_string()),
                },
            ],
            crew: vec![CrewMember {
                id: 3,
                name: "Director Person".to_string(),
                job: "Director".to_string(),
            }],
        },
        vec![Video {
            id: "v1".to_string(),
            key: "abc".to_string(),
            name: "Official Trailer".to_string(),
            site: "YouTube".to_string(),
            video_type: "Trailer".to_string(),
        }],
    )
}

fn scripted_error(status: u16) -> CatalogError {
    CatalogError::Api {
        status,
        message: "scripted failure".to_string(),
    }
}

/// Scripted `MovieApi` that records every call
#[derive(Default)]
pub struct FakeMovieApi {
    popular: Mutex<Option<std::result::Result<Vec<Movie>, u16>>>,
    popular_error: Mutex<Option<CatalogError>>,
    popular_pages: Mutex<Vec<u32>>,
    search: Mutex<HashMap<String, std::result::Result<Vec<Movie>, u16>>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    search_queries: Mutex<Vec<String>>,
    details: Mutex<Option<MovieDetails>>,
    failing_parts: Mutex<HashMap<String, u16>>,
    calls: AtomicUsize,
}

impl FakeMovieApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_popular(&self, result: std::result::Result<Vec<Movie>, u16>) {
        *self.popular.lock() = Some(result);
    }

    /// Fail the next popular fetch with `error`
    pub fn set_popular_error(&self, error: CatalogError) {
        *self.popular_error.lock() = Some(error);
    }

    pub fn popular_pages(&self) -> Vec<u32> {
        self.popular_pages.lock().clone()
    }

    pub fn set_search(&self, query: &str, result: std::result::Result<Vec<Movie>, u16>) {
        self.search.lock().insert(query.to_string(), result);
    }

    pub fn set_search_delay(&self, query: &str, delay: Duration) {
        self.search_delays.lock().insert(query.to_string(), delay);
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.search_queries.lock().clone()
    }

    pub fn set_details(&self, details: MovieDetails) {
        *self.details.lock() = Some(details);
        self.failing_parts.lock().clear();
    }

    pub fn fail_part(&self, part: DetailPart, status: u16) {
        self.failing_parts.lock().insert(part.to_string(), status);
    }

    pub fn total_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn details_part(&self, id: i64, part: DetailPart) -> Result<MovieDetails> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.failing_parts.lock().get(&part.to_string()) {
            return Err(scripted_error(*status));
        }
        self.details
            .lock()
            .clone()
            .filter(|d| d.id() == id)
            .ok_or_else(|| scripted_error(404))
    }
}

#[async_trait]
impl MovieApi for FakeMovieApi {
    async fn fetch_popular(&self, page: u32) -> Result<Vec<Movie>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.popular_pages.lock().push(page);
        if let Some(error) = self.popular_error.lock().take() {
            return Err(error);
        }
        match self.popular.lock().clone() {
            Some(Ok(movies)) => Ok(movies),
            Some(Err(status)) => Err(scripted_error(status)),
            None => Ok(Vec::new()),
        }
    }

    async fn search_movies(&self, query: &str, _page: u32) -> Result<Vec<Movie>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.search_queries.lock().push(query.to_string());

        let delay = self.search_delays.lock().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.search.lock().get(query).cloned();
        match scripted {
            Some(Ok(movies)) => Ok(movies),
            Some(Err(status)) => Err(scripted_error(status)),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_movie_core(&self, id: i64) -> Result<MovieDetailsCore> {
        let details = self.details_part(id, DetailPart::Core)?;
        Ok(MovieDetailsCore {
            movie: details.movie,
            runtime: details.runtime,
            genres: details.genres,
        })
    }

    async fn fetch_credits(&self, id: i64) -> Result<Credits> {
        Ok(self.details_part(id, DetailPart::Credits)?.credits)
    }

    async fn fetch_videos(&self, id: i64) -> Result<Vec<Video>> {
        Ok(self.details_part(id, DetailPart::Videos)?.videos)
    }
}

/// Storage whose every operation fails
pub struct FailingStorage;

fn unavailable() -> StoreError {
    StoreError::Io(std::io::Error::other("storage unavailable"))
}

#[async_trait]
impl KeyValueStorage for FailingStorage {
    async fn read(&self, _key: &str) -> crate::store::Result<Option<Vec<u8>>> {
        Err(unavailable())
    }

    async fn write(&self, _key: &str, _value: &[u8]) -> crate::store::Result<()> {
        Err(unavailable())
    }

    async fn remove(&self, _key: &str) -> crate::store::Result<()> {
        Err(unavailable())
    }
}
