//! Menu Cache - 菜单内存缓存
//!
//! Holds the full item list the catalog engine filters over. The list is the
//! remote `menu` table (or the built-in menu when that table is empty) with
//! image overrides applied. A failed load keeps whatever was there before.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde_json::Value;
use shared::catalog::{self, CatalogPage, CatalogQuery, ImageOverrides};
use shared::models::MenuItem;
use tokio_util::sync::CancellationToken;

use crate::store::{StoreError, Table, TableStore};

/// What a refresh did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Cache replaced; `fallback` is set when the remote table was empty
    Updated { count: usize, fallback: bool },
    /// Cancelled before the response was applied; cache untouched
    Cancelled,
    /// Load failed; cache untouched
    Failed(StoreError),
}

#[derive(Clone)]
pub struct MenuCache {
    items: Arc<RwLock<Arc<Vec<MenuItem>>>>,
    overrides: Arc<ImageOverrides>,
}

impl std::fmt::Debug for MenuCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuCache")
            .field("items_count", &self.items.read().len())
            .field("overrides_count", &self.overrides.len())
            .finish()
    }
}

impl MenuCache {
    /// Starts out serving the built-in menu
    pub fn new(overrides: ImageOverrides) -> Self {
        let mut items = catalog::fallback_menu();
        overrides.apply(&mut items);
        Self {
            items: Arc::new(RwLock::new(Arc::new(items))),
            overrides: Arc::new(overrides),
        }
    }

    /// Snapshot of the current list
    pub fn items(&self) -> Arc<Vec<MenuItem>> {
        self.items.read().clone()
    }

    pub fn page(&self, query: &CatalogQuery) -> CatalogPage {
        catalog::filter_catalog(&self.items(), query)
    }

    /// Load the `menu` table and swap it in.
    ///
    /// A response that arrives after `cancel` fires is dropped.
    pub async fn refresh(&self, store: &dyn TableStore, cancel: &CancellationToken) -> RefreshOutcome {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Menu refresh cancelled while waiting for backend");
                return RefreshOutcome::Cancelled;
            }
            result = store.select_all(Table::Menu) => result,
        };
        if cancel.is_cancelled() {
            return RefreshOutcome::Cancelled;
        }

        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load menu, keeping previous list");
                return RefreshOutcome::Failed(e);
            }
        };

        let total = rows.len();
        let mut remote = decode_menu_rows(rows);
        if remote.len() < total {
            tracing::warn!(dropped = total - remote.len(), "Ignoring unreadable or unpriced menu rows");
        }

        let fallback = remote.is_empty();
        if fallback {
            tracing::info!("Remote menu is empty, serving built-in menu");
        }
        remote = catalog::menu_or_fallback(remote);
        self.overrides.apply(&mut remote);

        let count = remote.len();
        *self.items.write() = Arc::new(remote);
        tracing::debug!(count, fallback, "Menu cache updated");
        RefreshOutcome::Updated { count, fallback }
    }
}

/// Decode row by row; a malformed or unpriced row is skipped, not fatal
fn decode_menu_rows(rows: Vec<Value>) -> Vec<MenuItem> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<MenuItem>(row) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed menu row");
                None
            }
        })
        .filter(MenuItem::has_valid_price)
        .collect()
}

/// Periodic menu reload
///
/// 注册为 `TaskKind::Periodic`，启动时立即加载一次。
pub struct MenuRefresher {
    cache: MenuCache,
    store: Arc<dyn TableStore>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl MenuRefresher {
    pub fn new(
        cache: MenuCache,
        store: Arc<dyn TableStore>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            cache,
            store,
            interval,
            shutdown,
        }
    }

    pub async fn run(self) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Menu refresher started");

        loop {
            if let RefreshOutcome::Updated { count, fallback } =
                self.cache.refresh(self.store.as_ref(), &self.shutdown).await
            {
                tracing::info!(count, fallback, "Menu loaded");
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Menu refresher received shutdown signal");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTableStore;
    use serde_json::json;

    fn menu_row(id: &str, name: &str, price: f64) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "description": "",
            "price": price,
            "category": "Snacks",
            "image_url": "",
            "is_veg": true,
            "is_spicy": false
        })
    }

    #[tokio::test]
    async fn test_starts_with_fallback() {
        let cache = MenuCache::new(ImageOverrides::new());
        assert_eq!(*cache.items(), catalog::fallback_menu());
    }

    #[tokio::test]
    async fn test_refresh_replaces_with_remote_and_applies_overrides() {
        let store = MemoryTableStore::new();
        store.seed(Table::Menu, vec![menu_row("m1", "Vada Pav", 49.0)]);
        let mut overrides = ImageOverrides::new();
        overrides.insert("Vada Pav", "/assets/vada-pav.jpg");
        let cache = MenuCache::new(overrides);

        let outcome = cache.refresh(&store, &CancellationToken::new()).await;

        assert_eq!(outcome, RefreshOutcome::Updated { count: 1, fallback: false });
        let items = cache.items();
        assert_eq!(items[0].image_url, "/assets/vada-pav.jpg");
    }

    #[tokio::test]
    async fn test_empty_remote_serves_fallback() {
        let store = MemoryTableStore::new();
        let cache = MenuCache::new(ImageOverrides::new());
        let outcome = cache.refresh(&store, &CancellationToken::new()).await;
        assert!(matches!(outcome, RefreshOutcome::Updated { fallback: true, .. }));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_list() {
        let store = MemoryTableStore::new();
        store.seed(Table::Menu, vec![menu_row("m1", "Vada Pav", 49.0)]);
        let cache = MenuCache::new(ImageOverrides::new());
        cache.refresh(&store, &CancellationToken::new()).await;

        store.set_unavailable(true);
        let outcome = cache.refresh(&store, &CancellationToken::new()).await;

        assert!(matches!(outcome, RefreshOutcome::Failed(StoreError::Transient(_))));
        assert_eq!(cache.items().len(), 1);
    }

    #[tokio::test]
    async fn test_rows_without_price_are_dropped() {
        let store = MemoryTableStore::new();
        store.seed(
            Table::Menu,
            vec![menu_row("m1", "Vada Pav", 49.0), menu_row("m2", "Free Water", 0.0)],
        );
        let cache = MenuCache::new(ImageOverrides::new());
        cache.refresh(&store, &CancellationToken::new()).await;
        assert_eq!(cache.items().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_row_does_not_discard_menu() {
        let store = MemoryTableStore::new();
        let mut broken = menu_row("m3", "Mystery Thali", 0.0);
        broken["price"] = serde_json::Value::Null;
        store.seed(
            Table::Menu,
            vec![menu_row("m1", "Vada Pav", 49.0), menu_row("m2", "Kachori", 39.0), broken],
        );
        let cache = MenuCache::new(ImageOverrides::new());

        let outcome = cache.refresh(&store, &CancellationToken::new()).await;

        assert_eq!(outcome, RefreshOutcome::Updated { count: 2, fallback: false });
        let names: Vec<_> = cache.items().iter().map(|item| item.name.clone()).collect();
        assert_eq!(names, vec!["Vada Pav", "Kachori"]);
    }

    #[tokio::test]
    async fn test_cancelled_token_leaves_cache_alone() {
        let store = MemoryTableStore::new();
        store.seed(Table::Menu, vec![menu_row("m1", "Vada Pav", 49.0)]);
        let cache = MenuCache::new(ImageOverrides::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = cache.refresh(&store, &cancel).await;

        assert_eq!(outcome, RefreshOutcome::Cancelled);
        assert_eq!(*cache.items(), catalog::fallback_menu());
    }
}
