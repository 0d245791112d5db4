//! Repository trait definitions for the domain layer.
//!
//! This module defines the storage contract the services depend on. Concrete
//! stores live in `crate::infrastructure::persistence`.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link records and their click ledgers
//!
//! # Testing
//!
//! See `tests/repository_memory.rs` and `tests/repository_pg.rs` for usage examples.

pub mod link_repository;

pub use link_repository::{LinkRepository, StoreError};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
