//! Dashboard module
//!
//! Provides an overview page with the overall totals, the most recent
//! transactions and a breakdown of the most recent month.

mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
