//! Business logic services for the application layer.

pub mod click_ledger;
pub mod link_service;
pub mod redirect_service;
pub mod stats_service;
mod store_call;

pub use click_ledger::ClickLedger;
pub use link_service::LinkService;
pub use redirect_service::{RedirectService, VisitRecordingPolicy};
pub use stats_service::StatsService;
