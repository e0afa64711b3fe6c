//! In-memory implementation of StateStore for testing and development

use crate::core::error::StorageError;
use crate::core::state::BarState;
use crate::core::store::StateStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory state store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryStateStore {
    state: Arc<RwLock<BarState>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryStateStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that starts out holding `state`
    pub fn with_state(state: BarState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load(&self) -> Result<BarState, StorageError> {
        let state = self
            .state
            .read()
            .map_err(|_| StorageError::Poisoned("read"))?;

        Ok(state.clone())
    }

    async fn save(&self, new_state: &BarState) -> Result<(), StorageError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| StorageError::Poisoned("write"))?;

        *state = new_state.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
