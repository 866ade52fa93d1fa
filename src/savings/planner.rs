//! Savings schedule arithmetic and per-period progress tracking.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{Error, InvalidField};

/// How often the user puts money aside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
}

impl Cadence {
    pub const ALL: [Cadence; 3] = [Cadence::Daily, Cadence::Weekly, Cadence::Monthly];

    /// The value used in forms and stored JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
        }
    }

    /// The name of a single period, e.g. "Week".
    pub fn period_name(self) -> &'static str {
        match self {
            Cadence::Daily => "Day",
            Cadence::Weekly => "Week",
            Cadence::Monthly => "Month",
        }
    }

    /// The number of periods in one month.
    ///
    /// Every month counts as 30 days or 4 weeks so plans have a whole number
    /// of periods.
    fn periods_per_month(self) -> u32 {
        match self {
            Cadence::Daily => 30,
            Cadence::Weekly => 4,
            Cadence::Monthly => 1,
        }
    }
}

impl Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = InvalidField;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Cadence::ALL
            .into_iter()
            .find(|cadence| cadence.as_str().eq_ignore_ascii_case(text.trim()))
            .ok_or_else(|| InvalidField::Cadence(text.to_owned()))
    }
}

/// Whether the user saved in a period. Periods without a mark are unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodMark {
    Saved,
    Missed,
}

/// Marks keyed by zero-based period index.
pub type PeriodMarks = BTreeMap<u32, PeriodMark>;

/// The longest plan that can be made: one hundred years.
pub const MAX_DURATION_MONTHS: u32 = 1200;

/// The number of periods in a plan lasting `duration_months`.
///
/// Returns `None` if the count does not fit in a `u32`.
pub fn period_count(duration_months: u32, cadence: Cadence) -> Option<u32> {
    duration_months.checked_mul(cadence.periods_per_month())
}

/// The amount to save each period, rounded to cents.
///
/// # Errors
/// Returns [Error::ValidationError] if `target` is not positive or there are
/// no periods.
pub fn per_period_amount(target: Decimal, period_count: u32) -> Result<Decimal, Error> {
    let mut invalid_fields = Vec::new();

    if target <= Decimal::ZERO {
        invalid_fields.push(InvalidField::TargetAmount);
    }

    if period_count == 0 {
        invalid_fields.push(InvalidField::Duration);
    }

    if !invalid_fields.is_empty() {
        return Err(Error::ValidationError(invalid_fields));
    }

    Ok((target / Decimal::from(period_count))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Advance the mark at `index` through unset, saved, missed and back to unset.
pub fn toggle_mark(marks: &PeriodMarks, index: u32) -> PeriodMarks {
    let mut marks = marks.clone();

    match marks.get(&index) {
        None => {
            marks.insert(index, PeriodMark::Saved);
        }
        Some(PeriodMark::Saved) => {
            marks.insert(index, PeriodMark::Missed);
        }
        Some(PeriodMark::Missed) => {
            marks.remove(&index);
        }
    }

    marks
}

fn saved_count(marks: &PeriodMarks, period_count: u32) -> u32 {
    marks
        .range(..period_count)
        .filter(|(_, mark)| **mark == PeriodMark::Saved)
        .count() as u32
}

/// The percentage of periods marked as saved. Marks past the end of the plan
/// are not counted.
pub fn progress_percent(marks: &PeriodMarks, period_count: u32) -> f64 {
    if period_count == 0 {
        return 0.0;
    }

    f64::from(saved_count(marks, period_count)) / f64::from(period_count) * 100.0
}

/// Whether every period has been marked as saved.
pub fn is_complete(marks: &PeriodMarks, period_count: u32) -> bool {
    period_count > 0 && saved_count(marks, period_count) == period_count
}

/// Labels for each period, e.g. "Day 1", "Day 2", ...
pub fn period_labels(cadence: Cadence, period_count: u32) -> Vec<String> {
    (1..=period_count)
        .map(|number| format!("{} {number}", cadence.period_name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{Error, InvalidField};

    use super::{
        Cadence, MAX_DURATION_MONTHS, PeriodMark, PeriodMarks, is_complete, per_period_amount,
        period_count, period_labels, progress_percent, toggle_mark,
    };

    #[test]
    fn period_count_per_cadence() {
        assert_eq!(period_count(3, Cadence::Daily), Some(90));
        assert_eq!(period_count(3, Cadence::Weekly), Some(12));
        assert_eq!(period_count(3, Cadence::Monthly), Some(3));
        assert_eq!(period_count(0, Cadence::Daily), Some(0));
        assert_eq!(period_count(MAX_DURATION_MONTHS, Cadence::Daily), Some(36_000));
    }

    #[test]
    fn period_count_overflow_is_none() {
        assert_eq!(period_count(200_000_000, Cadence::Daily), None);
        assert_eq!(period_count(u32::MAX, Cadence::Weekly), None);
        assert_eq!(period_count(u32::MAX, Cadence::Monthly), Some(u32::MAX));
    }

    #[test]
    fn per_period_amount_divides_target() {
        assert_eq!(per_period_amount(dec!(9000), 90), Ok(dec!(100.00)));
    }

    #[test]
    fn per_period_amount_rounds_to_cents() {
        assert_eq!(per_period_amount(dec!(1000), 3), Ok(dec!(333.33)));
        assert_eq!(per_period_amount(dec!(0.05), 2), Ok(dec!(0.03)));
    }

    #[test]
    fn per_period_amount_rejects_invalid_plans() {
        assert_eq!(
            per_period_amount(dec!(0), 0),
            Err(Error::ValidationError(vec![
                InvalidField::TargetAmount,
                InvalidField::Duration
            ]))
        );
        assert_eq!(
            per_period_amount(dec!(-10), 4),
            Err(Error::ValidationError(vec![InvalidField::TargetAmount]))
        );
    }

    #[test]
    fn toggle_cycles_through_three_states() {
        let unset = PeriodMarks::new();

        let saved = toggle_mark(&unset, 2);
        assert_eq!(saved, PeriodMarks::from([(2, PeriodMark::Saved)]));

        let missed = toggle_mark(&saved, 2);
        assert_eq!(missed, PeriodMarks::from([(2, PeriodMark::Missed)]));

        let cleared = toggle_mark(&missed, 2);
        assert_eq!(cleared, unset);
    }

    #[test]
    fn toggle_leaves_other_marks_alone() {
        let marks = PeriodMarks::from([(0, PeriodMark::Missed), (1, PeriodMark::Saved)]);

        let got = toggle_mark(&marks, 1);

        assert_eq!(
            got,
            PeriodMarks::from([(0, PeriodMark::Missed), (1, PeriodMark::Missed)])
        );
    }

    #[test]
    fn full_marks_are_complete() {
        let marks: PeriodMarks = (0..4).map(|index| (index, PeriodMark::Saved)).collect();

        assert_eq!(progress_percent(&marks, 4), 100.0);
        assert!(is_complete(&marks, 4));
    }

    #[test]
    fn missed_periods_do_not_count() {
        let marks = PeriodMarks::from([
            (0, PeriodMark::Saved),
            (1, PeriodMark::Missed),
            (2, PeriodMark::Saved),
        ]);

        assert_eq!(progress_percent(&marks, 4), 50.0);
        assert!(!is_complete(&marks, 4));
    }

    #[test]
    fn marks_outside_plan_are_ignored() {
        let marks = PeriodMarks::from([(0, PeriodMark::Saved), (7, PeriodMark::Saved)]);

        assert_eq!(progress_percent(&marks, 2), 50.0);
    }

    #[test]
    fn empty_plan_has_no_progress() {
        assert_eq!(progress_percent(&PeriodMarks::new(), 0), 0.0);
        assert!(!is_complete(&PeriodMarks::new(), 0));
    }

    #[test]
    fn labels_name_each_period() {
        assert_eq!(period_labels(Cadence::Daily, 2), vec!["Day 1", "Day 2"]);
        assert_eq!(period_labels(Cadence::Weekly, 1), vec!["Week 1"]);
        assert_eq!(
            period_labels(Cadence::Monthly, 3),
            vec!["Month 1", "Month 2", "Month 3"]
        );
    }

    #[test]
    fn parses_cadence_from_form_value() {
        assert_eq!("weekly".parse::<Cadence>(), Ok(Cadence::Weekly));
        assert_eq!("Monthly".parse::<Cadence>(), Ok(Cadence::Monthly));
        assert_eq!(
            "yearly".parse::<Cadence>(),
            Err(InvalidField::Cadence("yearly".to_owned()))
        );
    }
}
