//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and the
//! collaborators the services consume.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory link repositories
//! - [`geo`] - IP-to-country lookup
//! - [`audit`] - Best-effort audit file writer

pub mod audit;
pub mod geo;
pub mod persistence;
