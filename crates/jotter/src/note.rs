//! Core note types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to freshly created notes and shown for notes without one.
pub const DEFAULT_TITLE: &str = "Untitled Note";

/// Shown in listings in place of empty content.
pub const EMPTY_PREVIEW: &str = "No content";

/// A user-authored title/content pair with markdown content.
///
/// Serialized with camelCase field names; the whole collection is persisted
/// as a JSON array of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, fixed at creation.
    pub id: String,

    /// Free-text title. May be empty.
    pub title: String,

    /// Markdown source.
    pub content: String,

    /// Creation time in epoch milliseconds.
    pub created_at: i64,

    /// Last modification time in epoch milliseconds.
    pub updated_at: i64,
}

impl Note {
    /// Create an empty note stamped at `now`.
    #[must_use]
    pub fn new(now: i64) -> Self {
        Self {
            id: Self::generate_id(),
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate a fresh note id.
    #[must_use]
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Replace title and content, refreshing the modification time.
    ///
    /// `updated_at` never moves behind `created_at`, even if the clock does.
    pub fn edit(&mut self, title: impl Into<String>, content: impl Into<String>, now: i64) {
        self.title = title.into();
        self.content = content.into();
        self.updated_at = now.max(self.created_at);
    }

    /// Title for display.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    /// Content for display in a listing.
    #[must_use]
    pub fn preview(&self) -> &str {
        if self.content.is_empty() {
            EMPTY_PREVIEW
        } else {
            &self.content
        }
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}
