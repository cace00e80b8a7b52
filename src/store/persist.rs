use super::{KeyValueStorage, Result, StoreError};
use crate::catalog::Movie;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// The subset of store state that survives restarts.
///
/// Serialized as `{"isDarkMode": bool, "favorites": [Movie]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default = "default_dark_mode")]
    pub is_dark_mode: bool,
    #[serde(default)]
    pub favorites: Vec<Movie>,
}

const fn default_dark_mode() -> bool {
    true
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            is_dark_mode: default_dark_mode(),
            favorites: Vec::new(),
        }
    }
}

impl PersistedState {
    /// Read the persisted subset. Missing, unreadable or corrupt data all
    /// fall back to defaults.
    pub async fn load(storage: &dyn KeyValueStorage, key: &str) -> Self {
        let bytes = match storage.read(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No persisted state under '{}', using defaults", key);
                return Self::default();
            }
            Err(e) => {
                warn!("Failed to read persisted state '{}': {}", key, e);
                return Self::default();
            }
        };

        match serde_json::from_slice::<Self>(&bytes) {
            Ok(mut state) => {
                state.dedupe_favorites();
                info!(
                    "Rehydrated '{}' ({} favorites, dark mode: {})",
                    key,
                    state.favorites.len(),
                    state.is_dark_mode
                );
                state
            }
            Err(e) => {
                warn!("Discarding unreadable persisted state '{}': {}", key, e);
                Self::default()
            }
        }
    }

    /// Keep the first snapshot of each id
    fn dedupe_favorites(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.favorites.retain(|m| seen.insert(m.id));
    }
}

enum WriteCommand {
    Save(Vec<u8>),
    Flush(oneshot::Sender<()>),
}

/// Serializes persisted-state writes onto a single background task.
///
/// Writes are applied in the order they were scheduled, so the last mutation
/// is always the one left on disk. Write failures are logged and dropped.
pub(crate) struct PersistenceWriter {
    tx: mpsc::UnboundedSender<WriteCommand>,
    task: parking_lot::Mutex<Option<JoinHandle<()>>>,
}

impl PersistenceWriter {
    /// Spawn the writer task. Must be called inside a tokio runtime.
    pub(crate) fn spawn(storage: Arc<dyn KeyValueStorage>, key: String) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteCommand>();

        let task = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    WriteCommand::Save(bytes) => {
                        if let Err(e) = storage.write(&key, &bytes).await {
                            warn!("Failed to persist '{}': {}", key, e);
                        }
                    }
                    WriteCommand::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
            debug!("Persistence writer for '{}' stopped", key);
        });

        Self {
            tx,
            task: parking_lot::Mutex::new(Some(task)),
        }
    }

    /// Queue a write of `state`. Returns immediately.
    pub(crate) fn schedule(&self, state: &PersistedState) -> Result<()> {
        let bytes = serde_json::to_vec(state)?;
        self.tx
            .send(WriteCommand::Save(bytes))
            .map_err(|_| StoreError::WriterClosed)
    }

    /// Wait until every write scheduled so far has been attempted
    pub(crate) async fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(WriteCommand::Flush(ack_tx))
            .map_err(|_| StoreError::WriterClosed)?;
        ack_rx.await.map_err(|_| StoreError::WriterClosed)
    }

    /// Flush, then stop the task
    pub(crate) async fn close(&self) -> Result<()> {
        let flushed = self.flush().await;
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        flushed
    }
}
