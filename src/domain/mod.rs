//! Domain layer containing business entities and storage contracts.
//!
//! This module defines entities, repository interfaces, and request-scoped
//! value types independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`visit`] - Request context captured for a redirect
//!
//! # Redirect Flow
//!
//! 1. HTTP handler captures a [`visit::VisitContext`] from the request
//! 2. [`crate::application::services::RedirectService`] looks the code up and checks expiry
//! 3. [`crate::application::services::ClickLedger`] appends a
//!    [`entities::ClickEvent`] through [`repositories::LinkRepository::append_click`]

pub mod entities;
pub mod repositories;
pub mod visit;
