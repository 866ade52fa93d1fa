//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the overall totals.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for adding, filtering and listing transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for the month by month analysis of a category.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page for planning and tracking a savings goal.
pub const SAVINGS_VIEW: &str = "/savings";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create transactions or delete all of them.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to confirm a savings goal.
pub const SAVINGS_GOAL: &str = "/api/savings";
/// The route to calculate a savings schedule before confirming it.
pub const SAVINGS_ESTIMATE: &str = "/api/savings/estimate";
/// The route to cycle the mark on a savings period.
pub const SAVINGS_MARK: &str = "/api/savings/marks/{period_index}";
/// The route to discard the savings goal.
pub const SAVINGS_RESET: &str = "/api/savings/reset";
/// The route to get the next motivational quote.
pub const SAVINGS_QUOTE: &str = "/api/savings/quote";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace, for
/// example '{transaction_id}' in '/api/transactions/{transaction_id}'.
///
/// This function assumes that an endpoint path only contains a single
/// parameter. If no parameter is found, `endpoint_path` is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: impl std::fmt::Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
