//! Month by month analysis of a single category over a year.

mod charts;
mod handlers;

pub use handlers::get_categories_page;
