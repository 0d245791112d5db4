//! In-process implementation of link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::domain::entities::{ClickEvent, NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};

/// Sharded in-memory store for short links.
///
/// Each operation runs under the lock of the shard owning the code, so inserts
/// and click appends on different codes never contend, while two writers on the
/// same code are serialized. Records live for the lifetime of the process.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, ShortLink>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateCode(new_link.code)),
            Entry::Vacant(slot) => {
                let link = ShortLink::from(new_link);
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.links.get(code).map(|link| link.value().clone()))
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.links.contains_key(code))
    }

    async fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), StoreError> {
        match self.links.get_mut(code) {
            Some(mut link) => {
                link.clicks.push(click);
                Ok(())
            }
            None => Err(StoreError::NotFound(code.to_string())),
        }
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.links.len() as i64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {
        debug!(records = self.links.len(), "Closing in-memory link store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_link(code: &str) -> NewShortLink {
        NewShortLink::with_validity(
            code.to_string(),
            "https://example.com".to_string(),
            Utc::now(),
            30,
        )
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let repo = MemoryLinkRepository::new();

        let created = repo.insert(new_link("abc123")).await.unwrap();
        let found = repo.find_by_code("abc123").await.unwrap();

        assert_eq!(found, Some(created));
        assert!(repo.exists_by_code("abc123").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected_and_original_kept() {
        let repo = MemoryLinkRepository::new();
        repo.insert(new_link("taken")).await.unwrap();

        let mut second = new_link("taken");
        second.original_url = "https://other.example".to_string();
        let result = repo.insert(second).await;

        assert_eq!(result, Err(StoreError::DuplicateCode("taken".to_string())));
        let stored = repo.find_by_code("taken").await.unwrap().unwrap();
        assert_eq!(stored.original_url, "https://example.com");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_append_click_preserves_order() {
        let repo = MemoryLinkRepository::new();
        repo.insert(new_link("order")).await.unwrap();

        for referrer in ["https://a.example", "https://b.example", "https://c.example"] {
            repo.append_click("order", ClickEvent::new(Utc::now(), Some(referrer), None))
                .await
                .unwrap();
        }

        let link = repo.find_by_code("order").await.unwrap().unwrap();
        let referrers: Vec<_> = link.clicks.iter().map(|c| c.referrer.as_str()).collect();
        assert_eq!(
            referrers,
            ["https://a.example", "https://b.example", "https://c.example"]
        );
    }

    #[tokio::test]
    async fn test_append_click_unknown_code() {
        let repo = MemoryLinkRepository::new();

        let result = repo
            .append_click("missing", ClickEvent::new(Utc::now(), None, None))
            .await;

        assert_eq!(result, Err(StoreError::NotFound("missing".to_string())));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = MemoryLinkRepository::new();

        assert!(repo.find_by_code("nothing").await.unwrap().is_none());
        assert!(!repo.exists_by_code("nothing").await.unwrap());
    }
}
