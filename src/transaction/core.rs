//! The transaction model and the parsing of raw user input into it.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::InvalidField;

/// The format of dates in forms, query strings and stored JSON.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The largest magnitude accepted for an amount.
///
/// Amounts are stored as JSON numbers, so together with
/// [MAX_AMOUNT_DECIMAL_PLACES] this keeps every amount within the 15
/// significant digits a double holds exactly.
pub const MAX_AMOUNT: Decimal = dec!(999_999_999_999.99);

/// The most decimal places an amount may have.
pub const MAX_AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Transactions are identified by the millisecond timestamp of their creation.
pub type TransactionId = i64;

/// What a transaction was for.
///
/// [Category::Salary] is the only source of income, every other category is
/// an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Debt,
    Food,
    Groceries,
    Health,
    Housing,
    Salary,
    Savings,
    Shopping,
    Travel,
    Others,
}

impl Category {
    /// Every category in the order they are offered to the user.
    pub const ALL: [Category; 10] = [
        Category::Debt,
        Category::Food,
        Category::Groceries,
        Category::Health,
        Category::Housing,
        Category::Salary,
        Category::Savings,
        Category::Shopping,
        Category::Travel,
        Category::Others,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Debt => "Debt",
            Category::Food => "Food",
            Category::Groceries => "Groceries",
            Category::Health => "Health",
            Category::Housing => "Housing",
            Category::Salary => "Salary",
            Category::Savings => "Savings",
            Category::Shopping => "Shopping",
            Category::Travel => "Travel",
            Category::Others => "Others",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InvalidField;

    /// Parse the exact, case-sensitive name of a category.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == text)
            .ok_or_else(|| InvalidField::Category(text.to_owned()))
    }
}

/// The sign applied to the magnitude of every transaction in `category`.
///
/// Salary is income and so is positive, everything else is spending and so
/// is negative.
pub fn sign_for(category: Category) -> Decimal {
    match category {
        Category::Salary => Decimal::ONE,
        _ => Decimal::NEGATIVE_ONE,
    }
}

/// A single income or expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: Date,
    pub category: Category,
    /// Positive for income, negative for expenses.
    pub amount: Decimal,
}

impl Transaction {
    /// Create a transaction whose amount has the sign given by [sign_for].
    ///
    /// The sign of `magnitude` is ignored.
    pub fn new(id: TransactionId, date: Date, category: Category, magnitude: Decimal) -> Self {
        Self {
            id,
            date,
            category,
            amount: magnitude.abs() * sign_for(category),
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Parse a date in the format YYYY-MM-DD.
pub fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text.trim(), DATE_FORMAT).ok()
}

/// Parse a decimal number such as "12.50", "-3" or "1e3".
///
/// Returns `None` for text that is not a number and for amounts that fail
/// [is_storable_amount].
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
        .map(|amount| amount.normalize())
        .filter(|amount| is_storable_amount(*amount))
}

/// Whether `amount` is at most [MAX_AMOUNT] in magnitude and has no more than
/// [MAX_AMOUNT_DECIMAL_PLACES] decimal places.
pub fn is_storable_amount(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT && amount.normalize().scale() <= MAX_AMOUNT_DECIMAL_PLACES
}
