//! Newsletter Subscriber Model

use serde::{Deserialize, Serialize};

/// Newsletter sign-up. The backend keeps `email` unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberEmail {
    pub email: String,
}
