//! Repository trait for short link records and their click ledgers.

use crate::domain::entities::{ClickEvent, NewShortLink, ShortLink};
use async_trait::async_trait;

/// Failures reported by a [`LinkRepository`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// A record with this code already exists.
    #[error("short code '{0}' already exists")]
    DuplicateCode(String),

    /// No record exists for this code.
    #[error("short code '{0}' not found")]
    NotFound(String),

    /// The backing store failed or could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Storage contract for short links.
///
/// This is the single shared mutable resource of the service. Implementations
/// must make [`insert`](Self::insert) an atomic insert-if-absent and
/// [`append_click`](Self::append_click) an atomic add-to-collection, so that
/// concurrent writers can neither duplicate a code nor lose a click.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a record only if no record with the same code exists.
    ///
    /// This is the authoritative uniqueness guard: it must reject a duplicate
    /// even when a preceding [`exists_by_code`](Self::exists_by_code) probe raced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] if the code is taken.
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Fetches a record together with its full click ledger.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Cheap existence probe that does not load the click ledger.
    async fn exists_by_code(&self, code: &str) -> Result<bool, StoreError>;

    /// Atomically appends a click to the record's ledger.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists for `code`.
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), StoreError>;

    /// Counts all records, expired ones included.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases the store's resources. Called once at shutdown.
    async fn close(&self);
}
