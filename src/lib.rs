//! Client data layer for a movie browsing app.
//!
//! [`catalog`] talks to the remote metadata API, [`store::MovieStore`] holds
//! fetched data, favorites and the theme flag (persisting the latter two), and
//! [`debounce::SearchDebouncer`] throttles search-as-you-type input.

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod logging;
pub mod store;

#[cfg(test)]
mod testing;

pub use catalog::{CatalogError, Movie, MovieApi, MovieDetails, TmdbClient};
pub use config::AppConfig;
pub use debounce::SearchDebouncer;
pub use store::{MovieStore, StoreError};
