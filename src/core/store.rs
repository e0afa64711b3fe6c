//! Persistence port for the bar state

use super::error::StorageError;
use super::state::BarState;
use async_trait::async_trait;

/// Loads and saves the whole [`BarState`] at once
///
/// There are no partial updates: a mutation loads everything, changes it and
/// saves everything. Implementations must make `save` all-or-nothing, so a
/// concurrent `load` sees either the old or the new state, never a mix.
/// Serialising writers is the caller's job (see
/// [`BarService`](super::service::BarService)).
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the current state. A store that was never written loads as an
    /// empty state.
    async fn load(&self) -> Result<BarState, StorageError>;

    /// Replace the persisted state
    async fn save(&self, state: &BarState) -> Result<(), StorageError>;
}
