//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume the [`LinkRepository`]
//! trait object and provide a clean API for HTTP handlers and the admin CLI.
//!
//! Every store call goes through a deadline; a call that exceeds it surfaces
//! as [`AppError::StoreUnavailable`].
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Code reservation and link creation
//! - [`services::redirect_service::RedirectService`] - Lookup, expiry check, visit recording
//! - [`services::click_ledger::ClickLedger`] - Append-only click history
//! - [`services::stats_service::StatsService`] - Per-link analytics
//!
//! [`LinkRepository`]: crate::domain::repositories::LinkRepository
//! [`AppError::StoreUnavailable`]: crate::error::AppError::StoreUnavailable

pub mod services;
