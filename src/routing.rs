//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    categories::get_categories_page,
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    savings::{
        confirm_savings_goal_endpoint, estimate_savings_endpoint, get_savings_page,
        get_savings_quote, reset_savings_goal_endpoint, toggle_period_mark_endpoint,
    },
    transaction::{
        clear_transactions_endpoint, create_transaction_endpoint, delete_transaction_endpoint,
        get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let pages = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::SAVINGS_VIEW, get(get_savings_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint).delete(clear_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::SAVINGS_GOAL, post(confirm_savings_goal_endpoint))
        .route(endpoints::SAVINGS_ESTIMATE, post(estimate_savings_endpoint))
        .route(endpoints::SAVINGS_MARK, post(toggle_period_mark_endpoint))
        .route(endpoints::SAVINGS_RESET, post(reset_savings_goal_endpoint))
        .route(endpoints::SAVINGS_QUOTE, get(get_savings_quote));

    pages
        .merge(api)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
