use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error, InvalidField,
    transaction::{Transaction, parse_date},
};

/// Parse the bounds of an inclusive date range.
///
/// # Errors
/// Returns [Error::ValidationError] if either bound is missing or is not a
/// date in the format YYYY-MM-DD, or if `from` is after `to`.
pub fn parse_date_range(from: &str, to: &str) -> Result<RangeInclusive<Date>, Error> {
    let start = parse_date(from).ok_or_else(|| InvalidField::RangeStart(from.to_owned()));
    let end = parse_date(to).ok_or_else(|| InvalidField::RangeEnd(to.to_owned()));

    match (start, end) {
        (Ok(start), Ok(end)) if start > end => Err(Error::ValidationError(vec![
            InvalidField::RangeOrder {
                from: start,
                to: end,
            },
        ])),
        (Ok(start), Ok(end)) => Ok(start..=end),
        (start, end) => Err(Error::ValidationError(
            [start.err(), end.err()].into_iter().flatten().collect(),
        )),
    }
}

/// The transactions dated between `from` and `to`, both inclusive, in their
/// original order.
///
/// An empty result is not an error.
///
/// # Errors
/// Returns [Error::ValidationError] if the range is invalid, see [parse_date_range].
pub fn filter_by_date_range(
    transactions: &[Transaction],
    from: &str,
    to: &str,
) -> Result<Vec<Transaction>, Error> {
    let range = parse_date_range(from, to)?;

    Ok(transactions
        .iter()
        .filter(|transaction| range.contains(&transaction.date))
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error, InvalidField,
        transaction::{Category, Transaction},
    };

    use super::filter_by_date_range;

    fn get_transactions() -> Vec<Transaction> {
        vec![
            Transaction::new(4, date!(2025 - 03 - 01), Category::Food, dec!(10)),
            Transaction::new(3, date!(2025 - 02 - 15), Category::Travel, dec!(20)),
            Transaction::new(2, date!(2025 - 02 - 01), Category::Health, dec!(30)),
            Transaction::new(1, date!(2025 - 01 - 05), Category::Salary, dec!(5000)),
        ]
    }

    #[test]
    fn bounds_are_inclusive() {
        let transactions = get_transactions();

        let got = filter_by_date_range(&transactions, "2025-02-01", "2025-03-01").unwrap();

        let ids: Vec<i64> = got.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
    }

    #[test]
    fn single_day_range() {
        let transactions = get_transactions();

        let got = filter_by_date_range(&transactions, "2025-02-15", "2025-02-15").unwrap();

        assert_eq!(got, vec![transactions[1].clone()]);
    }

    #[test]
    fn no_matches_is_empty() {
        let transactions = get_transactions();

        let got = filter_by_date_range(&transactions, "2024-01-01", "2024-12-31").unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn rejects_reversed_range() {
        let result = filter_by_date_range(&get_transactions(), "2025-03-01", "2025-02-01");

        assert_eq!(
            result,
            Err(Error::ValidationError(vec![InvalidField::RangeOrder {
                from: date!(2025 - 03 - 01),
                to: date!(2025 - 02 - 01),
            }]))
        );
    }

    #[test]
    fn rejects_missing_and_malformed_bounds() {
        let result = filter_by_date_range(&get_transactions(), "", "tomorrow");

        assert_eq!(
            result,
            Err(Error::ValidationError(vec![
                InvalidField::RangeStart(String::new()),
                InvalidField::RangeEnd("tomorrow".to_owned()),
            ]))
        );
    }
}
