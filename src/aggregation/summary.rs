use std::collections::BTreeSet;

use rust_decimal::Decimal;
use time::{Date, Month};

use crate::transaction::{Category, Transaction};

/// Income and spending within a single calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlySummary {
    /// The sum of positive amounts.
    pub income: Decimal,
    /// The magnitude of spending, not counting money put into savings.
    pub expense: Decimal,
    /// The magnitude of money put into savings.
    pub savings: Decimal,
}

/// Totals over every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverallTotals {
    /// The sum of positive amounts.
    pub income: Decimal,
    /// The sum of negative amounts, so this is zero or negative.
    pub expense: Decimal,
    /// `income + expense`.
    pub balance: Decimal,
}

/// The total of `category` in each month of `year`, January first.
///
/// Months without matching transactions are zero.
pub fn monthly_totals_by_category(
    transactions: &[Transaction],
    year: i32,
    category: Category,
) -> [Decimal; 12] {
    let mut totals = [Decimal::ZERO; 12];

    transactions
        .iter()
        .filter(|transaction| transaction.date.year() == year && transaction.category == category)
        .for_each(|transaction| {
            let month_index = u8::from(transaction.date.month()) as usize - 1;
            totals[month_index] += transaction.amount;
        });

    totals
}

/// Split the transactions in `month` of `year` into income, expenses and savings.
pub fn monthly_summary(transactions: &[Transaction], year: i32, month: Month) -> MonthlySummary {
    let mut summary = MonthlySummary::default();
    let mut expense = Decimal::ZERO;
    let mut savings = Decimal::ZERO;

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.date.year() == year && transaction.date.month() == month)
    {
        if transaction.is_income() {
            summary.income += transaction.amount;
        }

        if transaction.category == Category::Savings {
            savings += transaction.amount;
        } else if transaction.amount < Decimal::ZERO {
            expense += transaction.amount;
        }
    }

    summary.expense = expense.abs();
    summary.savings = savings.abs();

    summary
}

pub fn overall_totals(transactions: &[Transaction]) -> OverallTotals {
    let (income, expense) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), transaction| {
            if transaction.amount > Decimal::ZERO {
                (income + transaction.amount, expense)
            } else {
                (income, expense + transaction.amount)
            }
        },
    );

    OverallTotals {
        income,
        expense,
        balance: income + expense,
    }
}

/// The month of the newest transaction, or of `today` if there are none.
///
/// `transactions` must be ordered newest first.
pub fn recent_month(transactions: &[Transaction], today: Date) -> (i32, Month) {
    let date = transactions
        .first()
        .map_or(today, |transaction| transaction.date);

    (date.year(), date.month())
}

/// At most `count` of the newest transactions.
///
/// `transactions` must be ordered newest first.
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> &[Transaction] {
    &transactions[..count.min(transactions.len())]
}

/// The years that have transactions plus `current_year`, oldest first.
pub fn available_years(transactions: &[Transaction], current_year: i32) -> Vec<i32> {
    transactions
        .iter()
        .map(|transaction| transaction.date.year())
        .chain(std::iter::once(current_year))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
