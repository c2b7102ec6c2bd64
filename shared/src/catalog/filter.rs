//! Filter / paginate / group pipeline

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::MenuItem;

/// Items revealed per "load more" step
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Current browse state of the menu
///
/// Changing the search text or a facet resets `page` to 1; only
/// [`CatalogQuery::load_more`] advances it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search: String,
    pub veg_only: bool,
    pub spicy_only: bool,
    pub page_size: usize,
    /// 1-based; 0 is read as 1
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            veg_only: false,
            spicy_only: false,
            page_size,
            page: 1,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
        self
    }

    pub fn with_veg_only(mut self, veg_only: bool) -> Self {
        if veg_only != self.veg_only {
            self.veg_only = veg_only;
            self.page = 1;
        }
        self
    }

    pub fn with_spicy_only(mut self, spicy_only: bool) -> Self {
        if spicy_only != self.spicy_only {
            self.spicy_only = spicy_only;
            self.page = 1;
        }
        self
    }

    /// Reveal the next `page_size` items of the same filtered set
    pub fn load_more(mut self) -> Self {
        self.page = self.page.max(1) + 1;
        self
    }

    /// Jump to an explicit page, keeping the filters
    pub fn at_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Upper bound on displayed items for the current page
    pub fn revealed_limit(&self) -> usize {
        self.page_size.saturating_mul(self.page.max(1))
    }

    /// Name contains the search text (case-insensitive) and every enabled
    /// facet holds
    pub fn matches(&self, item: &MenuItem) -> bool {
        let matches_search = self.search.is_empty()
            || item
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let matches_veg = !self.veg_only || item.is_veg;
        let matches_spicy = !self.spicy_only || item.is_spicy;
        matches_search && matches_veg && matches_spicy
    }
}

/// Items of one category in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<MenuItem>,
}

/// What the menu section renders for a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogPage {
    pub groups: Vec<CategoryGroup>,
    /// Items across all groups
    pub displayed: usize,
    /// Items matching the filters before truncation
    pub total_matching: usize,
    /// `total_matching - displayed`
    pub remaining: usize,
    /// Whether a "load more" affordance should be offered
    pub has_more: bool,
    pub page: usize,
    pub page_size: usize,
}

/// Derive the visible, grouped subset of `items` for `query`.
///
/// Matching items keep their original relative order and are truncated to
/// `page_size * page`. Groups appear in the order their first member appears
/// in the truncated subset.
pub fn filter_catalog(items: &[MenuItem], query: &CatalogQuery) -> CatalogPage {
    let limit = query.revealed_limit();
    let mut total_matching = 0;
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();

    for item in items.iter().filter(|item| query.matches(item)) {
        total_matching += 1;
        if total_matching > limit {
            continue;
        }

        match group_index.get(item.category.as_str()) {
            Some(&idx) => groups[idx].items.push(item.clone()),
            None => {
                group_index.insert(item.category.as_str(), groups.len());
                groups.push(CategoryGroup {
                    category: item.category.clone(),
                    items: vec![item.clone()],
                });
            }
        }
    }

    let displayed = total_matching.min(limit);
    CatalogPage {
        groups,
        displayed,
        total_matching,
        remaining: total_matching - displayed,
        has_more: displayed < total_matching,
        page: query.page.max(1),
        page_size: query.page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(id: &str, name: &str, category: &str, is_veg: bool, is_spicy: bool) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: Decimal::new(100, 0),
            category: category.to_string(),
            image_url: String::new(),
            is_veg,
            is_spicy,
        }
    }

    fn numbered(n: usize) -> Vec<MenuItem> {
        (0..n)
            .map(|i| item(&i.to_string(), &format!("Dish {i}"), ["Snacks", "Mains"][i % 2], i % 3 == 0, i % 4 == 0))
            .collect()
    }

    fn names(page: &CatalogPage) -> Vec<&str> {
        page.groups
            .iter()
            .flat_map(|g| g.items.iter().map(|i| i.name.as_str()))
            .collect()
    }

    #[test]
    fn test_samosa_veg_only_returns_one() {
        let items = vec![
            item("1", "Samosa (2 pcs)", "Snacks", true, false),
            item("2", "Chicken Samosa", "Snacks", false, true),
            item("3", "Masala Chai", "Beverages", true, false),
        ];
        let query = CatalogQuery::default()
            .with_search("samosa")
            .with_veg_only(true);

        let page = filter_catalog(&items, &query);
        assert_eq!(page.total_matching, 1);
        assert_eq!(names(&page), vec!["Samosa (2 pcs)"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = vec![item("1", "Paneer Butter Masala", "Mains", true, true)];
        let page = filter_catalog(&items, &CatalogQuery::default().with_search("BUTTER"));
        assert_eq!(page.total_matching, 1);
    }

    #[test]
    fn test_empty_query_shows_everything_up_to_page() {
        let items = numbered(5);
        let page = filter_catalog(&items, &CatalogQuery::default());
        assert_eq!(page.displayed, 5);
        assert_eq!(page.total_matching, 5);
        assert!(!page.has_more);
    }

    #[test]
    fn test_facets_combine_with_and() {
        let items = vec![
            item("1", "A", "X", true, true),
            item("2", "B", "X", true, false),
            item("3", "C", "X", false, true),
            item("4", "D", "X", false, false),
        ];
        let query = CatalogQuery::default()
            .with_veg_only(true)
            .with_spicy_only(true);
        assert_eq!(names(&filter_catalog(&items, &query)), vec!["A"]);
    }

    #[test]
    fn test_grouping_follows_first_seen_order() {
        let items = vec![
            item("a", "A", "cat1", true, false),
            item("b", "B", "cat2", true, false),
            item("c", "C", "cat1", true, false),
        ];
        let page = filter_catalog(&items, &CatalogQuery::default());
        let order: Vec<&str> = page.groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(order, vec!["cat1", "cat2"]);
        assert_eq!(page.groups[0].items.len(), 2);
    }

    #[test]
    fn test_group_order_uses_truncated_subset() {
        let mut items = numbered(2)
            .into_iter()
            .map(|mut i| {
                i.category = "Early".into();
                i
            })
            .collect::<Vec<_>>();
        items.push(item("late", "Late", "Late", false, false));
        items.insert(0, item("x", "Zero", "Early", false, false));

        let page = filter_catalog(&items, &CatalogQuery::new(2));
        let order: Vec<&str> = page.groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(order, vec!["Early"]);
        assert!(page.has_more);
    }

    #[test]
    fn test_truncation_and_load_more() {
        let items = numbered(20);
        let query = CatalogQuery::default();

        let page = filter_catalog(&items, &query);
        assert_eq!(page.displayed, 8);
        assert_eq!(page.remaining, 12);
        assert!(page.has_more);

        let page = filter_catalog(&items, &query.clone().load_more());
        assert_eq!(page.displayed, 16);
        assert_eq!(page.page, 2);

        let page = filter_catalog(&items, &query.load_more().load_more());
        assert_eq!(page.displayed, 20);
        assert_eq!(page.remaining, 0);
        assert!(!page.has_more);
    }

    #[test]
    fn test_truncation_preserves_relative_order() {
        let items = numbered(12);
        let page = filter_catalog(&items, &CatalogQuery::new(4));
        let mut shown: Vec<&str> = page
            .groups
            .iter()
            .flat_map(|g| g.items.iter().map(|i| i.id.as_str()))
            .collect();
        shown.sort_by_key(|id| id.parse::<usize>().unwrap());
        assert_eq!(shown, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_changing_filters_resets_page() {
        let items = numbered(30);
        let query = CatalogQuery::default().at_page(3);
        assert_eq!(filter_catalog(&items, &query).displayed, 24);

        let query = query.with_search("dish");
        assert_eq!(query.page, 1);
        assert!(filter_catalog(&items, &query).displayed <= query.page_size);

        let query = query.at_page(3).with_veg_only(true);
        assert_eq!(query.page, 1);
        let query = query.at_page(2).with_spicy_only(true);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_setting_same_value_keeps_page() {
        let query = CatalogQuery::default().with_search("chai").at_page(2);
        assert_eq!(query.clone().with_search("chai").page, 2);
        assert_eq!(query.with_veg_only(false).page, 2);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = numbered(13);
        let query = CatalogQuery::default().with_veg_only(true);
        assert_eq!(filter_catalog(&items, &query), filter_catalog(&items, &query));
    }

    #[test]
    fn test_count_invariants_hold_across_queries() {
        let items = numbered(25);
        for page_size in [1, 3, 8] {
            for page in 0..5 {
                for veg in [false, true] {
                    let query = CatalogQuery::new(page_size)
                        .with_veg_only(veg)
                        .at_page(page);
                    let result = filter_catalog(&items, &query);
                    assert!(result.total_matching >= result.displayed);
                    assert!(result.displayed <= page_size * page.max(1));
                    assert_eq!(result.has_more, result.displayed < result.total_matching);
                    let grouped: usize = result.groups.iter().map(|g| g.items.len()).sum();
                    assert_eq!(grouped, result.displayed);
                }
            }
        }
    }

    #[test]
    fn test_page_zero_reads_as_first_page() {
        let items = numbered(10);
        let mut query = CatalogQuery::new(3);
        query.page = 0;
        assert_eq!(filter_catalog(&items, &query).displayed, 3);
    }
}
