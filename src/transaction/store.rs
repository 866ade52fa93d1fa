//! The owner of the canonical list of transactions and the savings goal.

use serde::{Serialize, de::DeserializeOwned};
use time::OffsetDateTime;

use crate::{
    Error, InvalidField,
    persistence::{PersistentStore, SAVINGS_GOAL_KEY, TRANSACTIONS_KEY},
    savings::SavingsGoal,
    transaction::{
        Category, Transaction, TransactionId, is_storable_amount, parse_amount, parse_date,
    },
};

/// Holds the user's transactions, newest first, and their savings goal.
///
/// Every mutation is written through to the [PersistentStore] before it is
/// applied in memory, so a failed write leaves the store unchanged.
pub struct TransactionStore {
    persistent_store: Box<dyn PersistentStore>,
    transactions: Vec<Transaction>,
    savings_goal: Option<SavingsGoal>,
}

impl std::fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionStore")
            .field("transactions", &self.transactions)
            .field("savings_goal", &self.savings_goal)
            .finish_non_exhaustive()
    }
}

impl TransactionStore {
    /// Load the transactions and savings goal from `persistent_store`.
    ///
    /// Missing keys start out empty. Values that cannot be read or parsed are
    /// logged and replaced with empty data, loading itself never fails.
    /// Transactions are read one at a time, so a bad entry only drops itself.
    pub fn load(persistent_store: Box<dyn PersistentStore>) -> Self {
        let transactions = load_transactions(persistent_store.as_ref());
        let savings_goal = load_or_default::<Option<SavingsGoal>>(
            persistent_store.as_ref(),
            SAVINGS_GOAL_KEY,
        )
        .filter(|goal| {
            if !goal.is_within_limits() {
                tracing::warn!(
                    "Ignoring stored savings goal \"{}\" with out of range duration or amounts",
                    goal.goal_name
                );
            }

            goal.is_within_limits()
        });

        tracing::debug!(
            "Loaded {} transactions, savings goal set: {}",
            transactions.len(),
            savings_goal.is_some()
        );

        Self {
            persistent_store,
            transactions,
            savings_goal,
        }
    }

    /// Validate the raw form inputs and record a new transaction.
    ///
    /// `date` must be in the format YYYY-MM-DD, `category` must be the exact
    /// name of a [Category] and `amount` must be a finite number. The sign of
    /// `amount` is ignored: salary is stored as positive and everything else
    /// as negative.
    ///
    /// # Errors
    /// Returns [Error::ValidationError] listing every invalid field, or
    /// [Error::PersistenceWriteError] if the transaction could not be saved.
    /// No state changes on error.
    pub fn add_transaction(
        &mut self,
        date: &str,
        category: &str,
        amount: &str,
    ) -> Result<Transaction, Error> {
        let date = parse_date(date).ok_or_else(|| InvalidField::Date(date.to_owned()));
        let category = category.parse::<Category>();
        let amount = parse_amount(amount).ok_or_else(|| InvalidField::Amount(amount.to_owned()));

        let (date, category, amount) = match (date, category, amount) {
            (Ok(date), Ok(category), Ok(amount)) => (date, category, amount),
            (date, category, amount) => {
                let invalid_fields: Vec<InvalidField> = [date.err(), category.err(), amount.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                tracing::debug!("Rejected new transaction: {invalid_fields:?}");

                return Err(Error::ValidationError(invalid_fields));
            }
        };

        let transaction = Transaction::new(self.next_id(), date, category, amount);

        let mut transactions = Vec::with_capacity(self.transactions.len() + 1);
        transactions.push(transaction.clone());
        transactions.extend_from_slice(&self.transactions);

        self.save(TRANSACTIONS_KEY, &transactions)?;
        self.transactions = transactions;

        tracing::info!(
            "Added {} transaction {} of {} on {}",
            transaction.category,
            transaction.id,
            transaction.amount,
            transaction.date
        );

        Ok(transaction)
    }

    /// All transactions, newest first.
    pub fn list_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Delete the transaction with `id` and return it.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no transaction with `id`, or
    /// [Error::PersistenceWriteError] if the change could not be saved.
    pub fn remove_transaction(&mut self, id: TransactionId) -> Result<Transaction, Error> {
        let position = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or(Error::NotFound)?;

        let mut transactions = self.transactions.clone();
        let removed = transactions.remove(position);

        self.save(TRANSACTIONS_KEY, &transactions)?;
        self.transactions = transactions;

        tracing::info!("Removed transaction {id}");

        Ok(removed)
    }

    /// Delete every transaction.
    ///
    /// # Errors
    /// Returns [Error::PersistenceWriteError] if the change could not be saved.
    pub fn clear_transactions(&mut self) -> Result<(), Error> {
        self.save(TRANSACTIONS_KEY, &Vec::<Transaction>::new())?;
        let count = self.transactions.len();
        self.transactions.clear();

        tracing::info!("Cleared {count} transactions");

        Ok(())
    }

    /// Replace the savings goal, `None` clears it.
    ///
    /// # Errors
    /// Returns [Error::PersistenceWriteError] if the goal could not be saved.
    pub fn set_savings_goal(&mut self, goal: Option<SavingsGoal>) -> Result<(), Error> {
        self.save(SAVINGS_GOAL_KEY, &goal)?;
        self.savings_goal = goal;

        Ok(())
    }

    pub fn get_savings_goal(&self) -> Option<&SavingsGoal> {
        self.savings_goal.as_ref()
    }

    /// The current time in milliseconds, or one more than the newest ID if
    /// the clock has not moved past it.
    fn next_id(&self) -> TransactionId {
        let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as TransactionId;

        match self.transactions.iter().map(|transaction| transaction.id).max() {
            Some(newest) if newest >= now => newest + 1,
            _ => now,
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), Error> {
        let json = serde_json::to_string(value).map_err(|error| {
            tracing::error!("could not serialize {key}: {error}");
            Error::JSONSerializationError(error.to_string())
        })?;

        self.persistent_store
            .set(key, &json)
            .inspect_err(|error| tracing::error!("could not save {key}: {error}"))
    }
}

fn load_transactions(store: &dyn PersistentStore) -> Vec<Transaction> {
    let entries: Vec<serde_json::Value> = load_or_default(store, TRANSACTIONS_KEY);

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Transaction>(entry) {
            Ok(transaction) if is_storable_amount(transaction.amount) => Some(transaction),
            Ok(transaction) => {
                tracing::warn!(
                    "Ignoring stored transaction {} with out of range amount {}",
                    transaction.id,
                    transaction.amount
                );
                None
            }
            Err(error) => {
                let error = Error::PersistenceReadError(format!("{TRANSACTIONS_KEY}: {error}"));
                tracing::warn!("Ignoring stored transaction: {error}");
                None
            }
        })
        .collect()
}

fn load_or_default<T: DeserializeOwned + Default>(store: &dyn PersistentStore, key: &str) -> T {
    let json = match store.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return T::default(),
        Err(error) => {
            tracing::warn!("Could not read {key}, starting with empty data: {error}");
            return T::default();
        }
    };

    serde_json::from_str(&json).unwrap_or_else(|error| {
        let error = Error::PersistenceReadError(format!("{key}: {error}"));
        tracing::warn!("Ignoring stored {key}: {error}");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error, InvalidField,
        aggregation::overall_totals,
        persistence::{MemoryStore, PersistentStore},
        savings::{Cadence, SavingsGoal},
        transaction::{Category, MAX_AMOUNT, Transaction, TransactionStore},
    };

    fn get_test_store() -> TransactionStore {
        TransactionStore::load(Box::new(MemoryStore::new()))
    }

    /// Accepts reads but rejects every write.
    struct ReadOnlyStore(MemoryStore);

    impl PersistentStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, Error> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::PersistenceWriteError("read only".to_owned()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), Error> {
            Err(Error::PersistenceWriteError("read only".to_owned()))
        }
    }

    fn test_goal() -> SavingsGoal {
        SavingsGoal {
            goal_name: "Laptop".to_owned(),
            target_amount: dec!(9000),
            duration_months: 3,
            cadence: Cadence::Daily,
            per_period_amount: dec!(100),
            marks: Default::default(),
            completed: false,
        }
    }

    #[test]
    fn load_empty_store() {
        let store = get_test_store();

        assert!(store.list_transactions().is_empty());
        assert_eq!(store.get_savings_goal(), None);
    }

    #[test]
    fn load_ignores_corrupt_data() {
        let mut persistent_store = MemoryStore::new();
        persistent_store.set("transactions", "not json").unwrap();
        persistent_store.set("savingsGoal", "{\"goalName\": 1}").unwrap();

        let store = TransactionStore::load(Box::new(persistent_store));

        assert!(store.list_transactions().is_empty());
        assert_eq!(store.get_savings_goal(), None);
    }

    #[test]
    fn load_skips_only_unreadable_transactions() {
        let mut persistent_store = MemoryStore::new();
        persistent_store
            .set(
                "transactions",
                r#"[
                    {"id": 3, "date": "2025-01-07", "category": "Salary", "amount": 7.922816251426434e+28},
                    {"id": 2, "date": "2025-01-06", "category": "Food", "amount": -5.0},
                    {"id": 1, "date": "not a date", "category": "Food", "amount": -1.0},
                    {"id": 0, "date": "2025-01-05", "category": "Salary", "amount": 10000000000000.0}
                ]"#,
            )
            .unwrap();

        let store = TransactionStore::load(Box::new(persistent_store));

        assert_eq!(
            store.list_transactions(),
            &[Transaction {
                id: 2,
                date: date!(2025 - 01 - 06),
                category: Category::Food,
                amount: dec!(-5),
            }]
        );
    }

    #[test]
    fn load_ignores_goal_past_limits() {
        let mut persistent_store = MemoryStore::new();
        persistent_store
            .set(
                "savingsGoal",
                r#"{"goalName": "House", "targetAmount": 1000, "durationMonths": 200000000,
                    "cadence": "daily", "perPeriodAmount": 0, "marks": {}}"#,
            )
            .unwrap();

        let store = TransactionStore::load(Box::new(persistent_store));

        assert_eq!(store.get_savings_goal(), None);
    }

    #[test]
    fn add_transaction_rejects_oversized_amount() {
        let mut store = get_test_store();

        let result = store.add_transaction("2025-01-05", "Salary", "79228162514264337593543950335");

        assert_eq!(
            result,
            Err(Error::ValidationError(vec![InvalidField::Amount(
                "79228162514264337593543950335".to_owned()
            )]))
        );
        assert!(store.list_transactions().is_empty());
        assert_eq!(store.persistent_store.get("transactions"), Ok(None));
    }

    #[test]
    fn largest_amounts_can_be_totalled_and_reloaded() {
        let mut store = get_test_store();
        store
            .add_transaction("2025-01-05", "Salary", "999999999999.99")
            .unwrap();
        store
            .add_transaction("2025-01-06", "Salary", "999999999999.99")
            .unwrap();
        store
            .add_transaction("2025-01-07", "Food", "0.01")
            .unwrap();
        let want = store.list_transactions().to_vec();

        let totals = overall_totals(store.list_transactions());
        let reloaded = TransactionStore::load(store.persistent_store);

        assert_eq!(totals.income, MAX_AMOUNT * dec!(2));
        assert_eq!(totals.balance, MAX_AMOUNT * dec!(2) - dec!(0.01));
        assert_eq!(reloaded.list_transactions(), want.as_slice());
    }

    #[test]
    fn add_transaction_applies_category_sign() {
        let mut store = get_test_store();

        let salary = store
            .add_transaction("2025-01-05", "Salary", "-5000")
            .unwrap();
        let food = store.add_transaction("2025-01-10", "Food", "200").unwrap();

        assert_eq!(salary.amount, dec!(5000));
        assert_eq!(food.amount, dec!(-200));
        assert_eq!(food.date, date!(2025 - 01 - 10));
        assert_eq!(food.category, Category::Food);
    }

    #[test]
    fn add_transaction_prepends() {
        let mut store = get_test_store();

        let first = store.add_transaction("2025-03-01", "Food", "1").unwrap();
        let second = store.add_transaction("2025-01-01", "Travel", "2").unwrap();

        assert_eq!(store.list_transactions(), &[second, first]);
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let mut store = get_test_store();

        let ids: Vec<i64> = (0..5)
            .map(|_| store.add_transaction("2025-01-01", "Food", "1").unwrap().id)
            .collect();

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]), "got {ids:?}");
    }

    #[test]
    fn add_transaction_reports_every_invalid_field() {
        let mut store = get_test_store();

        let result = store.add_transaction("", "Rent", "abc");

        assert_eq!(
            result,
            Err(Error::ValidationError(vec![
                InvalidField::Date(String::new()),
                InvalidField::Category("Rent".to_owned()),
                InvalidField::Amount("abc".to_owned()),
            ]))
        );
        assert!(store.list_transactions().is_empty());
    }

    #[test]
    fn add_transaction_rejects_single_invalid_field() {
        let mut store = get_test_store();

        let result = store.add_transaction("2025-01-01", "Food", "");

        assert_eq!(
            result,
            Err(Error::ValidationError(vec![InvalidField::Amount(
                String::new()
            )]))
        );
    }

    #[test]
    fn failed_write_leaves_state_unchanged() {
        let mut persistent_store = MemoryStore::new();
        persistent_store
            .set(
                "transactions",
                r#"[{"id": 1, "date": "2025-01-05", "category": "Salary", "amount": 5000.0}]"#,
            )
            .unwrap();
        let mut store = TransactionStore::load(Box::new(ReadOnlyStore(persistent_store)));
        let before = store.list_transactions().to_vec();

        let add_result = store.add_transaction("2025-01-10", "Food", "200");
        let remove_result = store.remove_transaction(1);
        let clear_result = store.clear_transactions();
        let goal_result = store.set_savings_goal(Some(test_goal()));

        assert!(matches!(add_result, Err(Error::PersistenceWriteError(_))));
        assert!(matches!(remove_result, Err(Error::PersistenceWriteError(_))));
        assert!(matches!(clear_result, Err(Error::PersistenceWriteError(_))));
        assert!(matches!(goal_result, Err(Error::PersistenceWriteError(_))));
        assert_eq!(store.list_transactions(), before.as_slice());
        assert_eq!(store.get_savings_goal(), None);
    }

    #[test]
    fn list_transactions_is_idempotent() {
        let mut store = get_test_store();
        store.add_transaction("2025-01-05", "Salary", "5000").unwrap();

        let first = store.list_transactions().to_vec();
        let second = store.list_transactions().to_vec();

        assert_eq!(first, second);
    }

    #[test]
    fn remove_transaction() {
        let mut store = get_test_store();
        let kept = store.add_transaction("2025-01-05", "Salary", "5000").unwrap();
        let removed = store.add_transaction("2025-01-10", "Food", "200").unwrap();

        let got = store.remove_transaction(removed.id).unwrap();

        assert_eq!(got, removed);
        assert_eq!(store.list_transactions(), &[kept]);
    }

    #[test]
    fn remove_missing_transaction_is_not_found() {
        let mut store = get_test_store();
        store.add_transaction("2025-01-05", "Salary", "5000").unwrap();

        let result = store.remove_transaction(-1);

        assert_eq!(result, Err(Error::NotFound));
        assert_eq!(store.list_transactions().len(), 1);
    }

    #[test]
    fn clear_transactions() {
        let mut store = get_test_store();
        store.add_transaction("2025-01-05", "Salary", "5000").unwrap();

        store.clear_transactions().unwrap();

        assert!(store.list_transactions().is_empty());
    }

    #[test]
    fn set_and_clear_savings_goal() {
        let mut store = get_test_store();

        store.set_savings_goal(Some(test_goal())).unwrap();
        assert_eq!(store.get_savings_goal(), Some(&test_goal()));

        store.set_savings_goal(None).unwrap();
        assert_eq!(store.get_savings_goal(), None);
    }

    #[test]
    fn reload_restores_saved_state() {
        let mut store = get_test_store();
        store.add_transaction("2025-01-05", "Salary", "5000").unwrap();
        store.add_transaction("2025-01-10", "Food", "200.55").unwrap();
        store.add_transaction("2025-01-10", "Savings", "1000").unwrap();
        store.set_savings_goal(Some(test_goal())).unwrap();
        let want_transactions: Vec<Transaction> = store.list_transactions().to_vec();

        let reloaded = TransactionStore::load(store.persistent_store);

        assert_eq!(reloaded.list_transactions(), want_transactions.as_slice());
        assert_eq!(reloaded.get_savings_goal(), Some(&test_goal()));
    }

    #[test]
    fn cleared_goal_is_stored_as_null() {
        let mut store = get_test_store();
        store.set_savings_goal(Some(test_goal())).unwrap();

        store.set_savings_goal(None).unwrap();

        assert_eq!(
            store.persistent_store.get("savingsGoal"),
            Ok(Some("null".to_owned()))
        );
    }
}
