use super::{
    KeyValueStorage, Result,
    persist::{PersistedState, PersistenceWriter},
    state::{FetchFamily, SessionState, StoreState},
};
use crate::catalog::{Movie, MovieApi, MovieDetails};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Storage key of the onboarding flag, kept apart from the main store entry
pub const ONBOARDING_KEY: &str = "hasSeenOnboarding";

/// Application state for the movie views.
///
/// Owns the remote client and the durable storage handle. Fetch commands
/// settle their family's status on every path and never return errors; the
/// view reads `error()` instead. Theme and favorites are written back to
/// storage after each change.
pub struct MovieStore {
    api: Arc<dyn MovieApi>,
    storage: Arc<dyn KeyValueStorage>,
    state: watch::Sender<StoreState>,
    writer: PersistenceWriter,
    /// Bumped by every search, clear and empty query
    search_ticket: AtomicU64,
    /// Ticket of the newest search that went to the network
    search_network_ticket: AtomicU64,
}

impl MovieStore {
    /// Rehydrate the persisted subset stored under `store_name`, then start
    /// the persistence writer. Must be called inside a tokio runtime.
    pub async fn open(
        api: Arc<dyn MovieApi>,
        storage: Arc<dyn KeyValueStorage>,
        store_name: impl Into<String>,
    ) -> Self {
        let store_name = store_name.into();
        let persisted = PersistedState::load(storage.as_ref(), &store_name).await;
        let (state, _) = watch::channel(StoreState {
            session: SessionState::default(),
            persisted,
        });
        let writer = PersistenceWriter::spawn(storage.clone(), store_name);

        Self {
            api,
            storage,
            state,
            writer,
            search_ticket: AtomicU64::new(0),
            search_network_ticket: AtomicU64::new(0),
        }
    }

    // Queries

    /// Snapshot of the whole state
    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> SessionState {
        self.state.borrow().session.clone()
    }

    /// Receiver notified after every change
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Combined flag: set by the latest fetch start, cleared when a fetch settles
    pub fn is_loading(&self) -> bool {
        self.state.borrow().session.is_loading()
    }

    /// Message of the latest failed fetch, cleared when any fetch starts
    pub fn error(&self) -> Option<String> {
        self.state.borrow().session.error().map(str::to_string)
    }

    pub fn is_loading_for(&self, family: FetchFamily) -> bool {
        self.state.borrow().session.is_loading_for(family)
    }

    pub fn error_for(&self, family: FetchFamily) -> Option<String> {
        self.state.borrow().session.error_for(family).map(str::to_string)
    }

    pub fn popular_movies(&self) -> Vec<Movie> {
        self.state.borrow().session.popular_movies.clone()
    }

    pub fn search_results(&self) -> Vec<Movie> {
        self.state.borrow().session.search_results.clone()
    }

    pub fn movie_details(&self) -> Option<MovieDetails> {
        self.state.borrow().session.movie_details.clone()
    }

    pub fn is_dark_mode(&self) -> bool {
        self.state.borrow().is_dark_mode()
    }

    pub fn favorites(&self) -> Vec<Movie> {
        self.state.borrow().favorites().to_vec()
    }

    /// Membership check against the in-memory favorite set
    pub fn is_favorite(&self, id: i64) -> bool {
        self.state.borrow().is_favorite(id)
    }

    // Fetch commands

    /// Load page 1 of popular movies
    pub async fn fetch_popular_movies(&self) {
        info!("Fetching popular movies");
        self.begin(FetchFamily::Popular);

        match self.api.fetch_popular(1).await {
            Ok(movies) => {
                debug!("Loaded {} popular movies", movies.len());
                self.state.send_modify(|s| {
                    s.session.popular_movies = movies;
                    s.session.succeed(FetchFamily::Popular);
                });
            }
            Err(e) => self.fail(FetchFamily::Popular, &e),
        }
    }

    /// Fetch popular movies only when none are loaded yet
    pub async fn ensure_popular_movies(&self) {
        let empty = self.state.borrow().session.popular_movies.is_empty();
        if empty {
            self.fetch_popular_movies().await;
        }
    }

    /// Search by title.
    ///
    /// A blank query empties the results locally without a request. Results
    /// of a search that has since been superseded (by another search, a
    /// clear or a blank query) are dropped.
    pub async fn search_movies(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.clear_search();
            return;
        }

        let ticket = self.search_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.search_network_ticket.store(ticket, Ordering::SeqCst);
        info!("Searching movies for '{}'", query);
        self.begin(FetchFamily::Search);

        let result = self.api.search_movies(query, 1).await;

        self.state.send_if_modified(|s| {
            if self.search_ticket.load(Ordering::SeqCst) != ticket {
                debug!("Dropping superseded search results for '{}'", query);
                // Nothing newer went to the network, so nobody else will
                // settle the loading flag.
                if self.search_network_ticket.load(Ordering::SeqCst) == ticket
                    && s.session.status(FetchFamily::Search).is_loading()
                {
                    s.session.settle_idle(FetchFamily::Search);
                    return true;
                }
                return false;
            }

            match result {
                Ok(movies) => {
                    debug!("Search '{}' matched {} movies", query, movies.len());
                    s.session.search_results = movies;
                    s.session.succeed(FetchFamily::Search);
                }
                Err(e) => {
                    warn!("{}: {}", FetchFamily::Search.failure_message(), e);
                    s.session.fail(FetchFamily::Search);
                }
            }
            true
        });
    }

    /// Empty the search results. Loading and error flags are left alone.
    pub fn clear_search(&self) {
        self.search_ticket.fetch_add(1, Ordering::SeqCst);
        self.state.send_if_modified(|s| {
            if s.session.search_results.is_empty() {
                return false;
            }
            s.session.search_results.clear();
            true
        });
    }

    /// Load the detail record for `id`. On any sub-fetch failure the previous
    /// details stay in place.
    pub async fn fetch_movie_details(&self, id: i64) {
        info!("Fetching details for movie {}", id);
        self.begin(FetchFamily::Details);

        match self.api.fetch_movie_details(id).await {
            Ok(details) => {
                self.state.send_modify(|s| {
                    s.session.movie_details = Some(details);
                    s.session.succeed(FetchFamily::Details);
                });
            }
            Err(e) => self.fail(FetchFamily::Details, &e),
        }
    }

    fn begin(&self, family: FetchFamily) {
        self.state.send_modify(|s| s.session.begin(family));
    }

    fn fail(&self, family: FetchFamily, error: &crate::catalog::CatalogError) {
        warn!("{}: {}", family.failure_message(), error);
        self.state.send_modify(|s| s.session.fail(family));
    }

    // Persisted commands

    /// Add a snapshot of `movie`. Returns false if its id is already present.
    pub fn add_to_favorites(&self, movie: Movie) -> bool {
        self.mutate_persisted(|p| {
            if p.favorites.iter().any(|m| m.id == movie.id) {
                return false;
            }
            p.favorites.push(movie);
            true
        })
    }

    /// Returns false if `id` was not a favorite
    pub fn remove_from_favorites(&self, id: i64) -> bool {
        self.mutate_persisted(|p| {
            let before = p.favorites.len();
            p.favorites.retain(|m| m.id != id);
            p.favorites.len() != before
        })
    }

    /// Remove `movie` if present, add it otherwise. Returns the new membership.
    pub fn toggle_favorite(&self, movie: Movie) -> bool {
        let mut now_favorite = false;
        self.mutate_persisted(|p| {
            match p.favorites.iter().position(|m| m.id == movie.id) {
                Some(index) => {
                    p.favorites.remove(index);
                }
                None => {
                    p.favorites.push(movie);
                    now_favorite = true;
                }
            }
            true
        });
        now_favorite
    }

    /// Flip the theme. Returns the new dark-mode value.
    pub fn toggle_theme(&self) -> bool {
        let mut dark = false;
        self.mutate_persisted(|p| {
            p.is_dark_mode = !p.is_dark_mode;
            dark = p.is_dark_mode;
            true
        });
        dark
    }

    /// Apply `change` to the persisted subset; when it reports a change,
    /// notify subscribers and queue a write of exactly that subset.
    fn mutate_persisted(&self, change: impl FnOnce(&mut PersistedState) -> bool) -> bool {
        let mut changed = false;
        self.state.send_if_modified(|s| {
            changed = change(&mut s.persisted);
            if changed {
                if let Err(e) = self.writer.schedule(&s.persisted) {
                    warn!("Failed to schedule persistence: {}", e);
                }
            }
            changed
        });
        changed
    }

    // Onboarding

    pub async fn has_seen_onboarding(&self) -> bool {
        match self.storage.read(ONBOARDING_KEY).await {
            Ok(Some(value)) => value == b"true",
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read onboarding flag: {}", e);
                false
            }
        }
    }

    pub async fn mark_onboarding_complete(&self) {
        if let Err(e) = self.storage.write(ONBOARDING_KEY, b"true").await {
            warn!("Failed to store onboarding flag: {}", e);
        }
    }

    // Lifecycle

    /// Wait for every queued write to be attempted
    pub async fn flush(&self) -> Result<()> {
        self.writer.flush().await
    }

    /// Flush pending writes and stop the writer. Later mutations still update
    /// memory but are no longer persisted.
    pub async fn shutdown(&self) -> Result<()> {
        info!("Shutting down movie store");
        self.writer.close().await
    }
}
