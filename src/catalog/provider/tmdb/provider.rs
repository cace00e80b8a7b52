use super::api_types::{MovieListResponse, VideosResponse};
use crate::catalog::{
    CatalogError, ImageConfig, Result,
    provider::{HttpClient, MovieApi, ProviderConfig},
    types::{Credits, Movie, MovieDetailsCore, Video},
};
use async_trait::async_trait;
use tracing::debug;

/// Client for the remote movie metadata API
pub struct TmdbClient {
    client: HttpClient,
    api_key: String,
    language: String,
    images: ImageConfig,
}

impl TmdbClient {
    /// Build a client from provider configuration. Rejects an empty API key.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(CatalogError::Config("TMDB API key is not set".to_string()));
        }

        Ok(Self {
            client: HttpClient::new(config.base_url, config.timeout)?,
            api_key: config.api_key,
            language: config.language,
            images: ImageConfig::new(config.image_base_url),
        })
    }

    pub fn images(&self) -> &ImageConfig {
        &self.images
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn add_defaults<'a>(&'a self, params: &mut Vec<(&'a str, &'a str)>) {
        params.push(("api_key", self.api_key.as_str()));
        params.push(("language", self.language.as_str()));
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T> {
        let mut params: Vec<(&str, &str)> = Vec::with_capacity(extra_params.len() + 2);
        self.add_defaults(&mut params);
        params.extend_from_slice(extra_params);

        self.client.get_with_params(endpoint, &params).await
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn fetch_popular(&self, page: u32) -> Result<Vec<Movie>> {
        let page = page.to_string();
        let response: MovieListResponse = self
            .request("/movie/popular", &[("page", page.as_str())])
            .await?;

        debug!("Popular page {} returned {} movies", page, response.results.len());
        Ok(response.results)
    }

    async fn search_movies(&self, query: &str, page: u32) -> Result<Vec<Movie>> {
        let page = page.to_string();
        let response: MovieListResponse = self
            .request(
                "/search/movie",
                &[("query", query.trim()), ("page", page.as_str())],
            )
            .await?;

        debug!("Search '{}' returned {} movies", query, response.results.len());
        Ok(response.results)
    }

    async fn fetch_movie_core(&self, id: i64) -> Result<MovieDetailsCore> {
        self.request(&format!("/movie/{id}"), &[]).await
    }

    async fn fetch_credits(&self, id: i64) -> Result<Credits> {
        self.request(&format!("/movie/{id}/credits"), &[]).await
    }

    async fn fetch_videos(&self, id: i64) -> Result<Vec<Video>> {
        let response: VideosResponse = self.request(&format!("/movie/{id}/videos"), &[]).await?;
        Ok(response.results)
    }
}
