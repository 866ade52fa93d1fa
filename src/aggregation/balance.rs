use rust_decimal::Decimal;

use crate::transaction::Transaction;

/// The order in which rows are returned by [running_balances].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

/// A transaction and the balance after it was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRow<'a> {
    pub transaction: &'a Transaction,
    pub balance: Decimal,
}

/// Compute the running balance after each transaction.
///
/// Balances always accumulate in chronological order. Transactions on the
/// same day are applied in the order they were created. `order` only decides
/// whether the rows are returned oldest or newest first.
pub fn running_balances(transactions: &[Transaction], order: SortOrder) -> Vec<BalanceRow<'_>> {
    let mut chronological: Vec<&Transaction> = transactions.iter().collect();
    chronological.sort_by_key(|transaction| (transaction.date, transaction.id));

    let mut balance = Decimal::ZERO;
    let mut rows: Vec<BalanceRow> = chronological
        .into_iter()
        .map(|transaction| {
            balance += transaction.amount;
            BalanceRow {
                transaction,
                balance,
            }
        })
        .collect();

    if order == SortOrder::Descending {
        rows.reverse();
    }

    rows
}
