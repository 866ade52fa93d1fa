//! Pure functions that derive balances and summaries from a list of transactions.
//!
//! Nothing here is cached: pages call these functions on every request with
//! the current contents of the transaction store.

mod balance;
mod range;
mod summary;

pub use balance::{BalanceRow, SortOrder, running_balances};
pub use range::{filter_by_date_range, parse_date_range};
pub use summary::{
    MonthlySummary, OverallTotals, available_years, monthly_summary,
    monthly_totals_by_category, overall_totals, recent_month, recent_transactions,
};
