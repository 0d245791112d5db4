//! Short link entity representing a code → URL mapping.

use chrono::{DateTime, Duration, Utc};

use super::click::ClickEvent;

/// A short code mapped to a target URL.
///
/// All fields except `clicks` are fixed at creation. `clicks` is append-only and
/// ordered by insertion, which is also chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
    pub clicks: Vec<ClickEvent>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        expiry: DateTime<Utc>,
        clicks: Vec<ClickEvent>,
    ) -> Self {
        Self {
            code,
            original_url,
            created_at,
            expiry,
            clicks,
        }
    }

    /// Returns true if `now` is strictly after the expiry instant.
    ///
    /// A link is still honored at exactly its expiry timestamp.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry
    }

    pub fn total_clicks(&self) -> usize {
        self.clicks.len()
    }
}

impl From<NewShortLink> for ShortLink {
    fn from(new_link: NewShortLink) -> Self {
        Self::new(
            new_link.code,
            new_link.original_url,
            new_link.created_at,
            new_link.expiry,
            Vec::new(),
        )
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShortLink {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
}

impl NewShortLink {
    /// Builds a record valid for `validity_minutes` from `created_at`.
    ///
    /// Callers must pass a positive validity so that `expiry > created_at` holds.
    pub fn with_validity(
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        validity_minutes: u32,
    ) -> Self {
        Self {
            code,
            original_url,
            created_at,
            expiry: created_at + Duration::minutes(i64::from(validity_minutes)),
        }
    }
}
