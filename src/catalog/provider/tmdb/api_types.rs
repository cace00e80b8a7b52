use crate::catalog::types::{Movie, Video};
use serde::Deserialize;

/// Envelope of list endpoints (popular, search, videos). Paging fields are ignored.
#[derive(Debug, Deserialize)]
pub struct PageResponse<T> {
    pub results: Vec<T>,
}

pub type MovieListResponse = PageResponse<Movie>;

pub type VideosResponse = PageResponse<Video>;
