//! Transactions: the model, the store that owns them and the pages that edit them.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod store;
mod transactions_page;

pub use core::{
    Category, DATE_FORMAT, MAX_AMOUNT, MAX_AMOUNT_DECIMAL_PLACES, Transaction, TransactionId,
    is_storable_amount, parse_amount, parse_date, sign_for,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::{clear_transactions_endpoint, delete_transaction_endpoint};
pub use store::TransactionStore;
pub use transactions_page::get_transactions_page;
