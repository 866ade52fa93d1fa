//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{persistence::PersistentStore, transaction::TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,

    /// The user's transactions and savings goal.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl AppState {
    /// Create a new [AppState] by loading the transaction store from `persistent_store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Kolkata".
    pub fn new(persistent_store: Box<dyn PersistentStore>, local_timezone: &str) -> Self {
        Self {
            local_timezone: local_timezone.to_owned(),
            transaction_store: Arc::new(Mutex::new(TransactionStore::load(persistent_store))),
        }
    }
}
