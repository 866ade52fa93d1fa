//! Key-value storage for the serialized application state.
//!
//! The transaction store saves each piece of state as a JSON string under a
//! fixed key. The backing store has no transactions and no schema beyond
//! that: values are opaque text.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SQLiteStore;

use crate::Error;

/// The key holding the JSON array of transactions.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// The key holding the JSON savings goal object, or `null`.
pub const SAVINGS_GOAL_KEY: &str = "savingsGoal";

/// A synchronous store of string values addressed by string keys.
pub trait PersistentStore: Send {
    /// Get the value stored under `key`, or `None` if the key was never set or
    /// has been removed.
    ///
    /// # Errors
    /// Returns [Error::PersistenceReadError] if the backing store could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [Error::PersistenceWriteError] if the backing store rejected the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns [Error::PersistenceWriteError] if the backing store rejected the write.
    fn remove(&mut self, key: &str) -> Result<(), Error>;
}
