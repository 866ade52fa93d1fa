//! Defines the endpoints for deleting one transaction or all of them.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HX_TRIGGER, HxRedirect};

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    transaction::{TransactionId, TransactionStore},
};

/// The name of the event fired after a transaction is deleted, the
/// transactions table listens for it to refresh the running balances.
pub const TRANSACTIONS_CHANGED_EVENT: &str = "transactions-changed";

/// The state needed to delete transactions.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// A route handler for deleting a transaction, returns an alert and fires
/// [TRANSACTIONS_CHANGED_EVENT] on success.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.remove_transaction(transaction_id) {
        Ok(_) => (
            StatusCode::OK,
            [(HX_TRIGGER, TRANSACTIONS_CHANGED_EVENT)],
            Alert::Success {
                message: "Transaction deleted".to_owned(),
                details: String::new(),
            }
            .into_html(),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// A route handler for deleting every transaction, redirects to the transactions view.
pub async fn clear_transactions_endpoint(State(state): State<DeleteTransactionState>) -> Response {
    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if let Err(error) = store.clear_transactions() {
        tracing::error!("could not clear transactions: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
