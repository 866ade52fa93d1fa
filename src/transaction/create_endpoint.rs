//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{AppState, Error, endpoints, transaction::TransactionStore};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The raw form data for creating a transaction.
///
/// Fields are kept as text so that every invalid field can be reported
/// together instead of failing on the first one.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransactionForm {
    /// The date of the transaction, YYYY-MM-DD.
    pub date: String,
    /// The name of the category.
    pub category: String,
    /// The amount in rupees, the sign is decided by the category.
    pub amount: String,
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if let Err(error) = store.add_transaction(&form.date, &form.category, &form.amount) {
        tracing::info!("could not create transaction: {error}");

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
