//! The bar service: every operation as one load-mutate-save cycle

use super::error::{BarTabError, Rejection};
use super::form::{AddToTab, MAX_QUANTITY};
use super::report::{self, LeaderboardEntry, RevenueSummary, TabSummary};
use super::state::{BarState, Drink, LineItem};
use super::store::StateStore;
use std::sync::Arc;
use tokio::sync::Mutex;

type Result<T> = std::result::Result<T, BarTabError>;

/// Entry point for all tab, menu and customer operations
///
/// Holds the persistence port and a write lock. Mutations take the lock for
/// the whole load-mutate-save cycle, so two requests can never interleave and
/// lose each other's changes. Rejected mutations are not saved.
pub struct BarService {
    store: Arc<dyn StateStore>,
    write_lock: Mutex<()>,
}

impl BarService {
    pub fn new(store: impl StateStore + 'static) -> Self {
        Self::from_store(Arc::new(store))
    }

    pub fn from_store(store: Arc<dyn StateStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Current state, for read-only pages
    pub async fn snapshot(&self) -> Result<BarState> {
        Ok(self.store.load().await?)
    }

    async fn mutate<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut BarState) -> std::result::Result<T, Rejection> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut state = self.store.load().await?;
        let out = op(&mut state)?;
        self.store.save(&state).await?;
        Ok(out)
    }

    // =========================================================================
    // Tabs
    // =========================================================================

    /// Put `quantity` copies of an item on a tab. Returns the new tab length.
    pub async fn add_to_tab(&self, req: &AddToTab) -> Result<usize> {
        if req.quantity > MAX_QUANTITY {
            return Err(Rejection::QuantityTooLarge {
                value: req.quantity.to_string(),
                max: MAX_QUANTITY,
            }
            .into());
        }
        let len = self
            .mutate(|state| Ok(state.add_to_tab(&req.customer, req.item.clone(), req.quantity)))
            .await?;
        tracing::info!(
            customer = %req.customer,
            item = %req.item.name,
            quantity = req.quantity,
            "added to tab"
        );
        Ok(len)
    }

    /// Remove one item. Unknown customers and indexes are not errors; the
    /// result is `None` and the state is saved unchanged.
    pub async fn remove_item(&self, customer: &str, index: usize) -> Result<Option<LineItem>> {
        let removed = self
            .mutate(|state| Ok(state.remove_item(customer, index)))
            .await?;
        match &removed {
            Some(item) => tracing::info!(customer, index, item = %item.name, "removed from tab"),
            None => tracing::debug!(customer, index, "nothing to remove"),
        }
        Ok(removed)
    }

    /// Empty a tab, keeping the customer. Returns whether the customer exists.
    pub async fn close_tab(&self, customer: &str) -> Result<bool> {
        let closed = self.mutate(|state| Ok(state.close_tab(customer))).await?;
        if closed {
            tracing::info!(customer, "tab closed");
        }
        Ok(closed)
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Returns the stored (trimmed) name
    pub async fn add_customer(&self, name: &str) -> Result<String> {
        self.mutate(|state| state.add_customer(name)).await?;
        let name = name.trim().to_string();
        tracing::info!(customer = %name, "customer added");
        Ok(name)
    }

    pub async fn delete_customer(&self, name: &str) -> Result<()> {
        let items = self.mutate(|state| state.delete_customer(name)).await?;
        tracing::info!(customer = name, dropped_items = items.len(), "customer deleted");
        Ok(())
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Returns the stored (trimmed) name
    pub async fn add_category(&self, name: &str) -> Result<String> {
        self.mutate(|state| state.add_category(name)).await?;
        let name = name.trim().to_string();
        tracing::info!(category = %name, "category added");
        Ok(name)
    }

    pub async fn add_drink(&self, category: Option<&str>, name: &str, price: &str) -> Result<Drink> {
        let drink = self
            .mutate(|state| state.add_drink(category, name, price))
            .await?;
        tracing::info!(
            category = category.unwrap_or_default(),
            drink = %drink.name,
            price = drink.price,
            "drink added"
        );
        Ok(drink)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    pub async fn tab_overview(&self) -> Result<Vec<TabSummary>> {
        Ok(report::tab_overview(&self.snapshot().await?))
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        Ok(report::leaderboard(&self.snapshot().await?))
    }

    pub async fn revenue_summary(&self) -> Result<RevenueSummary> {
        Ok(report::revenue_summary(&self.snapshot().await?))
    }
}
