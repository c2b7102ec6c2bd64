//! Menu catalog: search, facets, "load more" paging and category grouping
//!
//! Everything here is a pure function of its inputs. The current filter
//! state lives in an immutable [`CatalogQuery`] that callers replace rather
//! than mutate.

mod fallback;
mod filter;
mod overrides;

pub use fallback::fallback_menu;
pub use filter::{CatalogPage, CatalogQuery, CategoryGroup, DEFAULT_PAGE_SIZE, filter_catalog};
pub use overrides::ImageOverrides;

use crate::models::MenuItem;

/// Items to browse: the remote list, or the built-in menu when it is empty
pub fn menu_or_fallback(remote: Vec<MenuItem>) -> Vec<MenuItem> {
    if remote.is_empty() {
        fallback_menu()
    } else {
        remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_remote_uses_fallback() {
        let items = menu_or_fallback(Vec::new());
        assert_eq!(items, fallback_menu());
        assert!(!items.is_empty());
    }

    #[test]
    fn test_remote_list_is_kept() {
        let mut remote = fallback_menu();
        remote.truncate(2);
        assert_eq!(menu_or_fallback(remote.clone()), remote);
    }
}
