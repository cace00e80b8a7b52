mod movie_store;
mod persist;
mod state;
mod storage;

pub use movie_store::{MovieStore, ONBOARDING_KEY};
pub use persist::PersistedState;
pub use state::{FetchFamily, FetchStatus, SessionState, StoreState};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

/// Store result type
pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable storage error types.
///
/// These never cross the store boundary; the store logs them and carries on.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Persistence writer has stopped")]
    WriterClosed,
}
