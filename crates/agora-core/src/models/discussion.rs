use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DiscussionId;

/// A discussion: the scope owning one idea graph and its posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: DiscussionId,
    pub slug: String,
    pub topic: String,
    /// Locales used for language-aware text processing, e.g. `["en", "fr"]`.
    pub locales: Vec<String>,
    pub creation_date: DateTime<Utc>,
}

/// Input for creating a discussion (and its root idea).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiscussion {
    pub slug: String,
    pub topic: String,
    #[serde(default)]
    pub locales: Vec<String>,
}

impl NewDiscussion {
    pub fn new(slug: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            topic: topic.into(),
            locales: Vec::new(),
        }
    }

    pub fn with_locales(mut self, locales: &[&str]) -> Self {
        self.locales = locales.iter().map(|l| (*l).to_string()).collect();
        self
    }
}
