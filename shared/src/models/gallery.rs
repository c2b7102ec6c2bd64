//! Gallery Model

use serde::{Deserialize, Serialize};

/// Gallery image row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

const DEFAULT_GALLERY: [(&str, &str); 8] = [
    ("/assets/cafe-interior.jpg", "Our cozy café interior"),
    ("/assets/cappuccino.jpg", "Fresh coffee being brewed"),
    ("/assets/masala-chai.jpg", "Traditional masala chai"),
    ("/assets/paneer-butter-masala.jpg", "Delicious homemade curries"),
    ("/assets/masala-dosa.jpg", "Authentic South Indian"),
    ("/assets/samosa.jpg", "Golden crispy samosas"),
    ("/assets/gulab-jamun.jpg", "Sweet delights"),
    ("/assets/biryani.jpg", "Fragrant biryani"),
];

/// Built-in gallery shown while the remote table is empty
pub fn default_gallery() -> Vec<GalleryImage> {
    DEFAULT_GALLERY
        .iter()
        .enumerate()
        .map(|(i, (url, caption))| GalleryImage {
            id: format!("default-{}", i + 1),
            image_url: (*url).to_string(),
            caption: Some((*caption).to_string()),
        })
        .collect()
}

/// Remote images when present, otherwise the built-in set
pub fn gallery_or_default(remote: Vec<GalleryImage>) -> Vec<GalleryImage> {
    if remote.is_empty() {
        default_gallery()
    } else {
        remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_remote_uses_defaults() {
        let images = gallery_or_default(Vec::new());
        assert_eq!(images.len(), 8);
        assert_eq!(images[0].id, "default-1");
        assert_eq!(images[5].caption.as_deref(), Some("Golden crispy samosas"));
    }

    #[test]
    fn test_remote_images_win() {
        let remote = vec![GalleryImage {
            id: "g1".into(),
            image_url: "https://cdn.example/terrace.jpg".into(),
            caption: None,
        }];
        assert_eq!(gallery_or_default(remote.clone()), remote);
    }
}
