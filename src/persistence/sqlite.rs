use rusqlite::{Connection, OptionalExtension};

use crate::{Error, persistence::PersistentStore};

/// A [PersistentStore] backed by a single SQLite table.
#[derive(Debug)]
pub struct SQLiteStore {
    connection: Connection,
}

impl SQLiteStore {
    /// Wrap `connection`, creating the key-value table if it does not exist yet.
    ///
    /// # Errors
    /// Returns [Error::PersistenceWriteError] if the table could not be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_key_value_table(&connection).map_err(|error| {
            tracing::error!("could not create the key_value table: {error}");
            Error::PersistenceWriteError(error.to_string())
        })?;

        Ok(Self { connection })
    }
}

fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

impl PersistentStore for SQLiteStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .query_row(
                "SELECT value FROM key_value WHERE key = ?1",
                (key,),
                |row| row.get(0),
            )
            .optional()
            .map_err(|error| Error::PersistenceReadError(error.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection
            .execute(
                "INSERT INTO key_value (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                (key, value),
            )
            .map(|_| ())
            .map_err(|error| Error::PersistenceWriteError(error.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.connection
            .execute("DELETE FROM key_value WHERE key = ?1", (key,))
            .map(|_| ())
            .map_err(|error| Error::PersistenceWriteError(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::persistence::{PersistentStore, SQLiteStore};

    fn get_test_store() -> SQLiteStore {
        let connection = Connection::open_in_memory().unwrap();
        SQLiteStore::new(connection).unwrap()
    }

    #[test]
    fn get_missing_key_returns_none() {
        let store = get_test_store();

        assert_eq!(store.get("transactions"), Ok(None));
    }

    #[test]
    fn set_then_get_returns_value() {
        let mut store = get_test_store();

        store.set("transactions", "[]").unwrap();

        assert_eq!(store.get("transactions"), Ok(Some("[]".to_owned())));
    }

    #[test]
    fn set_overwrites_existing_value() {
        let mut store = get_test_store();

        store.set("savingsGoal", "{}").unwrap();
        store.set("savingsGoal", "null").unwrap();

        assert_eq!(store.get("savingsGoal"), Ok(Some("null".to_owned())));
    }

    #[test]
    fn remove_deletes_value() {
        let mut store = get_test_store();
        store.set("transactions", "[]").unwrap();

        store.remove("transactions").unwrap();

        assert_eq!(store.get("transactions"), Ok(None));
    }

    #[test]
    fn new_keeps_existing_table() {
        let connection = Connection::open_in_memory().unwrap();
        let mut store = SQLiteStore::new(connection).unwrap();
        store.set("transactions", "[]").unwrap();

        let store = SQLiteStore::new(store.connection).unwrap();

        assert_eq!(store.get("transactions"), Ok(Some("[]".to_owned())));
    }
}
