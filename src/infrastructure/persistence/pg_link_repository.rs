//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};

/// PostgreSQL repository for short links and their click ledgers.
///
/// Uniqueness is enforced by the `short_links` primary key; inserts use
/// `ON CONFLICT DO NOTHING` so a lost race is reported as
/// [`StoreError::DuplicateCode`] rather than a database error. Clicks are rows in
/// `link_clicks`, so every append is a single atomic `INSERT`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    expiry: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    clicked_at: DateTime<Utc>,
    referrer: String,
    location: String,
}

impl From<ClickRow> for ClickEvent {
    fn from(row: ClickRow) -> Self {
        ClickEvent {
            timestamp: row.clicked_at,
            referrer: row.referrer,
            location: row.location,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let inserted: Option<String> = sqlx::query_scalar(
            r#"
            INSERT INTO short_links (code, original_url, created_at, expiry)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (code) DO NOTHING
            RETURNING code
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.original_url)
        .bind(new_link.created_at)
        .bind(new_link.expiry)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match inserted {
            Some(_) => Ok(ShortLink::from(new_link)),
            None => Err(StoreError::DuplicateCode(new_link.code)),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        let row: Option<LinkRow> = sqlx::query_as(
            r#"
            SELECT code, original_url, created_at, expiry
            FROM short_links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let clicks: Vec<ClickRow> = sqlx::query_as(
            r#"
            SELECT clicked_at, referrer, location
            FROM link_clicks
            WHERE code = $1
            ORDER BY id
            "#,
        )
        .bind(code)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(Some(ShortLink::new(
            row.code,
            row.original_url,
            row.created_at,
            row.expiry,
            clicks.into_iter().map(ClickEvent::from).collect(),
        )))
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM short_links WHERE code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn append_click(&self, code: &str, click: ClickEvent) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO link_clicks (code, clicked_at, referrer, location)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(code)
        .bind(click.timestamp)
        .bind(&click.referrer)
        .bind(&click.location)
        .execute(self.pool.as_ref())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_foreign_key_violation(&e) => Err(StoreError::NotFound(code.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}
