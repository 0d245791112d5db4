//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A short code bound to a target URL, its expiry and click ledger
//! - [`ClickEvent`] - One recorded redirect visit
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! [`NewShortLink`] carries everything fixed at creation time, while the click
//! ledger only grows through [`crate::domain::repositories::LinkRepository::append_click`].

pub mod click;
pub mod link;

pub use click::{ClickEvent, DIRECT_REFERRER, UNKNOWN_LOCATION};
pub use link::{NewShortLink, ShortLink};
