//! Savings goals: planning a schedule, confirming it and tracking each period.

mod endpoints;
mod goal;
mod page;
mod planner;
mod quotes;
mod views;

pub use endpoints::{
    confirm_savings_goal_endpoint, estimate_savings_endpoint, get_savings_quote,
    reset_savings_goal_endpoint, toggle_period_mark_endpoint,
};
pub use goal::{SavingsEstimate, SavingsGoal, SavingsPlan};
pub use page::get_savings_page;
pub use planner::{
    Cadence, MAX_DURATION_MONTHS, PeriodMark, PeriodMarks, is_complete, per_period_amount,
    period_count, period_labels, progress_percent, toggle_mark,
};
pub use quotes::{QUOTE_ROTATION_SECONDS, QUOTES, Quote, next_quote_index, quote_at};
