use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::MenuItem;

/// Curated image per item name, applied on top of the remote `image_url`
///
/// Loaded from a JSON object such as `{"Masala Chai": "/assets/masala-chai.jpg"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageOverrides(HashMap<String, String>);

impl ImageOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, name: impl Into<String>, image_url: impl Into<String>) {
        self.0.insert(name.into(), image_url.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rewrite `image_url` of every item whose name has an override
    pub fn apply(&self, items: &mut [MenuItem]) {
        if self.0.is_empty() {
            return;
        }
        for item in items.iter_mut() {
            if let Some(url) = self.0.get(&item.name) {
                item.image_url.clone_from(url);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback_menu;

    #[test]
    fn test_apply_rewrites_matching_names_only() {
        let mut items = fallback_menu();
        let before = items.clone();
        let overrides =
            ImageOverrides::from_json_str(r#"{"Vada Pav": "/assets/vada-pav.jpg"}"#).unwrap();

        overrides.apply(&mut items);

        for (after, before) in items.iter().zip(&before) {
            if after.name == "Vada Pav" {
                assert_eq!(after.image_url, "/assets/vada-pav.jpg");
            } else {
                assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn test_empty_table_is_noop() {
        let mut items = fallback_menu();
        let before = items.clone();
        ImageOverrides::new().apply(&mut items);
        assert_eq!(items, before);
    }

    #[test]
    fn test_rejects_non_object_json() {
        assert!(ImageOverrides::from_json_str("[1, 2]").is_err());
    }
}
