use super::persist::PersistedState;
use crate::catalog::{Movie, MovieDetails};

/// Independent groups of fetches, each with its own status and data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchFamily {
    Popular,
    Search,
    Details,
}

impl FetchFamily {
    pub const ALL: [Self; 3] = [Self::Popular, Self::Search, Self::Details];

    /// Message surfaced to the view when a fetch of this family fails
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Popular => "Failed to fetch popular movies",
            Self::Search => "Failed to search movies",
            Self::Details => "Failed to fetch movie details",
        }
    }
}

impl std::fmt::Display for FetchFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Popular => write!(f, "popular"),
            Self::Search => write!(f, "search"),
            Self::Details => write!(f, "details"),
        }
    }
}

/// Lifecycle of one fetch family
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Volatile fetch results. Never persisted; a fresh process starts from `Default`.
///
/// Each family keeps its own status. The combined `is_loading`/`error` view
/// follows the most recent transition of any family: starting a fetch sets
/// loading and clears the error, settling clears loading, and a failure
/// reports that family's message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub popular_movies: Vec<Movie>,
    pub search_results: Vec<Movie>,
    pub movie_details: Option<MovieDetails>,
    popular: FetchStatus,
    search: FetchStatus,
    details: FetchStatus,
    loading: bool,
    last_error: Option<FetchFamily>,
}

impl SessionState {
    pub fn status(&self, family: FetchFamily) -> &FetchStatus {
        match family {
            FetchFamily::Popular => &self.popular,
            FetchFamily::Search => &self.search,
            FetchFamily::Details => &self.details,
        }
    }

    fn status_mut(&mut self, family: FetchFamily) -> &mut FetchStatus {
        match family {
            FetchFamily::Popular => &mut self.popular,
            FetchFamily::Search => &mut self.search,
            FetchFamily::Details => &mut self.details,
        }
    }

    /// True from the latest fetch start until the next fetch settles
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the latest failure, cleared when any fetch starts
    pub fn error(&self) -> Option<&str> {
        self.last_error.map(FetchFamily::failure_message)
    }

    pub fn is_loading_for(&self, family: FetchFamily) -> bool {
        self.status(family).is_loading()
    }

    pub fn error_for(&self, family: FetchFamily) -> Option<&str> {
        self.status(family).error()
    }

    /// Enter `Loading`, clearing this family's error and the combined one.
    /// Data is kept.
    pub(crate) fn begin(&mut self, family: FetchFamily) {
        *self.status_mut(family) = FetchStatus::Loading;
        self.loading = true;
        self.last_error = None;
    }

    pub(crate) fn succeed(&mut self, family: FetchFamily) {
        *self.status_mut(family) = FetchStatus::Succeeded;
        self.loading = false;
    }

    /// Settle with the family's message; the data field keeps its prior value
    pub(crate) fn fail(&mut self, family: FetchFamily) {
        *self.status_mut(family) = FetchStatus::Failed(family.failure_message().to_string());
        self.loading = false;
        self.last_error = Some(family);
    }

    /// Drop back to `Idle` without touching data (superseded request)
    pub(crate) fn settle_idle(&mut self, family: FetchFamily) {
        *self.status_mut(family) = FetchStatus::Idle;
        self.loading = false;
    }
}

/// Everything a view can read: volatile session data plus persisted preferences
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub session: SessionState,
    pub persisted: PersistedState,
}

impl StoreState {
    pub fn is_dark_mode(&self) -> bool {
        self.persisted.is_dark_mode
    }

    pub fn favorites(&self) -> &[Movie] {
        &self.persisted.favorites
    }

    pub fn is_favorite(&self, id: i64) -> bool {
        self.persisted.favorites.iter().any(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_idle_and_empty() {
        let session = SessionState::default();

        assert!(session.popular_movies.is_empty());
        assert!(session.search_results.is_empty());
        assert!(session.movie_details.is_none());
        assert!(!session.is_loading());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_families_are_independent() {
        let mut session = SessionState::default();

        session.begin(FetchFamily::Popular);
        session.begin(FetchFamily::Search);
        session.fail(FetchFamily::Search);

        assert!(session.is_loading_for(FetchFamily::Popular));
        assert!(!session.is_loading_for(FetchFamily::Search));
        assert_eq!(session.error_for(FetchFamily::Search), Some("Failed to search movies"));
        assert!(session.error_for(FetchFamily::Popular).is_none());

        session.succeed(FetchFamily::Popular);
        assert_eq!(session.status(FetchFamily::Details), &FetchStatus::Idle);
        assert_eq!(session.status(FetchFamily::Popular), &FetchStatus::Succeeded);
    }

    #[test]
    fn test_combined_view_follows_latest_transition() {
        let mut session = SessionState::default();

        session.begin(FetchFamily::Details);
        session.fail(FetchFamily::Details);
        assert_eq!(session.error(), Some("Failed to fetch movie details"));
        assert!(!session.is_loading());

        session.begin(FetchFamily::Popular);
        assert!(session.is_loading());
        assert!(session.error().is_none());
        assert_eq!(
            session.error_for(FetchFamily::Details),
            Some("Failed to fetch movie details")
        );

        session.begin(FetchFamily::Search);
        session.succeed(FetchFamily::Popular);
        assert!(!session.is_loading());
        assert!(session.is_loading_for(FetchFamily::Search));

        session.fail(FetchFamily::Search);
        assert_eq!(session.error(), Some("Failed to search movies"));
    }

    #[test]
    fn test_begin_clears_family_error() {
        let mut session = SessionState::default();

        session.fail(FetchFamily::Details);
        assert_eq!(session.error(), Some("Failed to fetch movie details"));

        session.begin(FetchFamily::Details);
        assert!(session.error().is_none());
    }
}
