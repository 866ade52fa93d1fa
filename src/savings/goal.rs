//! The savings goal and the steps from an empty form to a completed plan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error, InvalidField,
    savings::planner::{
        Cadence, MAX_DURATION_MONTHS, PeriodMarks, is_complete, per_period_amount, period_count,
        progress_percent, toggle_mark,
    },
    transaction::{is_storable_amount, parse_amount},
};

/// A confirmed savings plan and the user's progress through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub goal_name: String,
    pub target_amount: Decimal,
    pub duration_months: u32,
    pub cadence: Cadence,
    pub per_period_amount: Decimal,
    #[serde(default, with = "marks_json")]
    pub marks: PeriodMarks,
    #[serde(default)]
    pub completed: bool,
}

impl SavingsGoal {
    /// The number of periods in the plan, zero if the stored duration is out
    /// of range.
    pub fn period_count(&self) -> u32 {
        if self.is_within_limits() {
            period_count(self.duration_months, self.cadence).unwrap_or(0)
        } else {
            0
        }
    }

    /// Whether the duration and amounts are ones the goal form accepts.
    ///
    /// Stored goals are checked with this on load since the stored JSON may
    /// have been edited by hand.
    pub fn is_within_limits(&self) -> bool {
        (1..=MAX_DURATION_MONTHS).contains(&self.duration_months)
            && self.target_amount > Decimal::ZERO
            && is_storable_amount(self.target_amount)
            && is_storable_amount(self.per_period_amount)
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(&self.marks, self.period_count())
    }
}

/// Marks are stored as an object keyed by period index where `true` is
/// saved, `false` is missed and `null` or a missing key is unset.
mod marks_json {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::savings::planner::{PeriodMark, PeriodMarks};

    pub fn serialize<S: Serializer>(marks: &PeriodMarks, serializer: S) -> Result<S::Ok, S::Error> {
        marks
            .iter()
            .map(|(index, mark)| (*index, *mark == PeriodMark::Saved))
            .collect::<BTreeMap<u32, bool>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PeriodMarks, D::Error> {
        let marks = BTreeMap::<u32, Option<bool>>::deserialize(deserializer)?;

        Ok(marks
            .into_iter()
            .filter_map(|(index, saved)| match saved {
                Some(true) => Some((index, PeriodMark::Saved)),
                Some(false) => Some((index, PeriodMark::Missed)),
                None => None,
            })
            .collect())
    }
}

/// The schedule computed from the goal form, waiting to be confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsEstimate {
    pub goal_name: String,
    pub target_amount: Decimal,
    pub duration_months: u32,
    pub cadence: Cadence,
    pub period_count: u32,
    pub per_period_amount: Decimal,
}

impl SavingsEstimate {
    /// Validate the raw goal form inputs and compute the schedule.
    ///
    /// # Errors
    /// Returns [Error::ValidationError] listing every invalid field.
    pub fn new(
        goal_name: &str,
        target_amount: &str,
        duration_months: &str,
        cadence: &str,
    ) -> Result<Self, Error> {
        let target = parse_amount(target_amount)
            .filter(|amount| *amount > Decimal::ZERO)
            .ok_or(InvalidField::TargetAmount);
        let duration = duration_months
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|months| (1..=MAX_DURATION_MONTHS).contains(months))
            .ok_or(InvalidField::Duration);
        let cadence = cadence.parse::<Cadence>();

        let (target_amount, duration_months, cadence) = match (target, duration, cadence) {
            (Ok(target), Ok(duration), Ok(cadence)) => (target, duration, cadence),
            (target, duration, cadence) => {
                return Err(Error::ValidationError(
                    [target.err(), duration.err(), cadence.err()]
                        .into_iter()
                        .flatten()
                        .collect(),
                ));
            }
        };

        let period_count = period_count(duration_months, cadence)
            .ok_or_else(|| Error::ValidationError(vec![InvalidField::Duration]))?;

        Ok(Self {
            goal_name: goal_name.trim().to_owned(),
            target_amount,
            duration_months,
            cadence,
            period_count,
            per_period_amount: per_period_amount(target_amount, period_count)?,
        })
    }

    fn into_goal(self) -> SavingsGoal {
        SavingsGoal {
            goal_name: self.goal_name,
            target_amount: self.target_amount,
            duration_months: self.duration_months,
            cadence: self.cadence,
            per_period_amount: self.per_period_amount,
            marks: PeriodMarks::new(),
            completed: false,
        }
    }
}

/// Where the user is in setting up and following a savings plan.
///
/// ```text
/// Draft --estimate--> Estimated --confirm--> Active --toggle--> Completed
///   ^                  |     ^                  |                   |
///   |                  +-----+ (estimate)       |                   |
///   +------------------------ reset ------------+-------------------+
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SavingsPlan {
    Draft,
    Estimated(SavingsEstimate),
    Active(SavingsGoal),
    Completed(SavingsGoal),
}

impl SavingsPlan {
    /// The plan for the goal held by the transaction store.
    pub fn from_goal(goal: Option<SavingsGoal>) -> Self {
        match goal {
            None => SavingsPlan::Draft,
            Some(goal) if goal.completed => SavingsPlan::Completed(goal),
            Some(goal) => SavingsPlan::Active(goal),
        }
    }

    /// Replace the draft, or a previous estimate, with `estimate`.
    ///
    /// # Errors
    /// Returns [Error::GoalAlreadyActive] if a goal has been confirmed.
    pub fn estimate(&self, estimate: SavingsEstimate) -> Result<Self, Error> {
        match self {
            SavingsPlan::Draft | SavingsPlan::Estimated(_) => Ok(SavingsPlan::Estimated(estimate)),
            SavingsPlan::Active(_) | SavingsPlan::Completed(_) => Err(Error::GoalAlreadyActive),
        }
    }

    /// Turn the estimate into a goal with no marks.
    ///
    /// # Errors
    /// Returns [Error::MissingEstimate] if there is nothing to confirm, or
    /// [Error::GoalAlreadyActive] if a goal has already been confirmed.
    pub fn confirm(&self) -> Result<Self, Error> {
        match self {
            SavingsPlan::Estimated(estimate) => Ok(SavingsPlan::Active(estimate.clone().into_goal())),
            SavingsPlan::Draft => Err(Error::MissingEstimate),
            SavingsPlan::Active(_) | SavingsPlan::Completed(_) => Err(Error::GoalAlreadyActive),
        }
    }

    /// Cycle the mark of period `index`, completing the goal once every
    /// period is saved.
    ///
    /// # Errors
    /// Returns [Error::GoalCompleted] for a completed goal,
    /// [Error::NoActiveGoal] if no goal has been confirmed, or
    /// [Error::ValidationError] if `index` is past the end of the plan.
    pub fn toggle(&self, index: u32) -> Result<Self, Error> {
        let goal = match self {
            SavingsPlan::Active(goal) => goal,
            SavingsPlan::Completed(_) => return Err(Error::GoalCompleted),
            SavingsPlan::Draft | SavingsPlan::Estimated(_) => return Err(Error::NoActiveGoal),
        };

        let period_count = goal.period_count();
        if index >= period_count {
            return Err(Error::ValidationError(vec![InvalidField::PeriodIndex {
                index,
                period_count,
            }]));
        }

        let marks = toggle_mark(&goal.marks, index);
        let completed = is_complete(&marks, period_count);
        let goal = SavingsGoal {
            marks,
            completed,
            ..goal.clone()
        };

        if completed {
            tracing::info!("Savings goal \"{}\" completed", goal.goal_name);
            Ok(SavingsPlan::Completed(goal))
        } else {
            Ok(SavingsPlan::Active(goal))
        }
    }

    /// Discard everything and start over.
    pub fn reset(&self) -> Self {
        SavingsPlan::Draft
    }

    /// The confirmed goal, if any.
    pub fn goal(&self) -> Option<&SavingsGoal> {
        match self {
            SavingsPlan::Active(goal) | SavingsPlan::Completed(goal) => Some(goal),
            SavingsPlan::Draft | SavingsPlan::Estimated(_) => None,
        }
    }

    /// The goal to hand to the transaction store.
    pub fn into_goal(self) -> Option<SavingsGoal> {
        match self {
            SavingsPlan::Active(goal) | SavingsPlan::Completed(goal) => Some(goal),
            SavingsPlan::Draft | SavingsPlan::Estimated(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        Error, InvalidField,
        savings::planner::{Cadence, PeriodMark, PeriodMarks},
    };

    use super::{SavingsEstimate, SavingsGoal, SavingsPlan};

    fn monthly_estimate() -> SavingsEstimate {
        SavingsEstimate::new("Holiday", "4000", "4", "monthly").unwrap()
    }

    fn active_plan() -> SavingsPlan {
        SavingsPlan::Draft
            .estimate(monthly_estimate())
            .and_then(|plan| plan.confirm())
            .unwrap()
    }

    #[test]
    fn estimate_computes_schedule() {
        let estimate = SavingsEstimate::new(" Laptop ", "9000", "3", "daily").unwrap();

        assert_eq!(
            estimate,
            SavingsEstimate {
                goal_name: "Laptop".to_owned(),
                target_amount: dec!(9000),
                duration_months: 3,
                cadence: Cadence::Daily,
                period_count: 90,
                per_period_amount: dec!(100.00),
            }
        );
    }

    #[test]
    fn estimate_reports_every_invalid_field() {
        let result = SavingsEstimate::new("Car", "-5", "0", "hourly");

        assert_eq!(
            result,
            Err(Error::ValidationError(vec![
                InvalidField::TargetAmount,
                InvalidField::Duration,
                InvalidField::Cadence("hourly".to_owned()),
            ]))
        );
    }

    #[test]
    fn estimate_rejects_durations_past_limit() {
        for duration in ["1201", "200000000", "4294967295", "4294967296"] {
            assert_eq!(
                SavingsEstimate::new("House", "1000", duration, "daily"),
                Err(Error::ValidationError(vec![InvalidField::Duration])),
                "want {duration} months rejected"
            );
        }
    }

    #[test]
    fn estimate_accepts_longest_plan() {
        let estimate = SavingsEstimate::new("House", "36000", "1200", "daily").unwrap();

        assert_eq!(estimate.period_count, 36_000);
        assert_eq!(estimate.per_period_amount, dec!(1.00));
    }

    #[test]
    fn estimate_rejects_oversized_target() {
        assert_eq!(
            SavingsEstimate::new("Island", "1000000000000", "12", "monthly"),
            Err(Error::ValidationError(vec![InvalidField::TargetAmount]))
        );
    }

    #[test]
    fn goal_with_out_of_range_duration_has_no_periods() {
        let goal = SavingsGoal {
            duration_months: 200_000_000,
            ..active_plan().into_goal().unwrap()
        };

        assert!(!goal.is_within_limits());
        assert_eq!(goal.period_count(), 0);
        assert_eq!(goal.progress_percent(), 0.0);
    }

    #[test]
    fn reestimating_replaces_previous_estimate() {
        let first = SavingsPlan::Draft.estimate(monthly_estimate()).unwrap();
        let second_estimate = SavingsEstimate::new("Holiday", "4000", "4", "weekly").unwrap();

        let second = first.estimate(second_estimate.clone()).unwrap();

        assert_eq!(second, SavingsPlan::Estimated(second_estimate));
    }

    #[test]
    fn confirm_starts_goal_without_marks() {
        let plan = active_plan();

        let goal = plan.goal().unwrap();
        assert_eq!(goal.per_period_amount, dec!(1000.00));
        assert!(goal.marks.is_empty());
        assert!(!goal.completed);
    }

    #[test]
    fn confirm_requires_estimate() {
        assert_eq!(SavingsPlan::Draft.confirm(), Err(Error::MissingEstimate));
        assert_eq!(active_plan().confirm(), Err(Error::GoalAlreadyActive));
    }

    #[test]
    fn estimate_rejected_once_active() {
        assert_eq!(
            active_plan().estimate(monthly_estimate()),
            Err(Error::GoalAlreadyActive)
        );
    }

    #[test]
    fn saving_every_period_completes_goal() {
        let mut plan = active_plan();

        for index in 0..3 {
            plan = plan.toggle(index).unwrap();
            assert!(matches!(plan, SavingsPlan::Active(_)));
        }
        plan = plan.toggle(3).unwrap();

        let SavingsPlan::Completed(goal) = &plan else {
            panic!("want completed plan, got {plan:?}");
        };
        assert!(goal.completed);
        assert_eq!(goal.progress_percent(), 100.0);
    }

    #[test]
    fn completed_goal_rejects_toggle() {
        let mut plan = active_plan();
        for index in 0..4 {
            plan = plan.toggle(index).unwrap();
        }

        assert_eq!(plan.toggle(0), Err(Error::GoalCompleted));
    }

    #[test]
    fn toggle_requires_active_goal() {
        assert_eq!(SavingsPlan::Draft.toggle(0), Err(Error::NoActiveGoal));
        let estimated = SavingsPlan::Draft.estimate(monthly_estimate()).unwrap();
        assert_eq!(estimated.toggle(0), Err(Error::NoActiveGoal));
    }

    #[test]
    fn toggle_rejects_index_past_end() {
        assert_eq!(
            active_plan().toggle(4),
            Err(Error::ValidationError(vec![InvalidField::PeriodIndex {
                index: 4,
                period_count: 4,
            }]))
        );
    }

    #[test]
    fn reset_returns_to_draft() {
        assert_eq!(active_plan().reset(), SavingsPlan::Draft);
        assert_eq!(active_plan().reset().into_goal(), None);
    }

    #[test]
    fn from_goal_restores_state() {
        let goal = active_plan().into_goal().unwrap();
        let completed = SavingsGoal {
            completed: true,
            ..goal.clone()
        };

        assert_eq!(SavingsPlan::from_goal(None), SavingsPlan::Draft);
        assert_eq!(
            SavingsPlan::from_goal(Some(goal.clone())),
            SavingsPlan::Active(goal)
        );
        assert_eq!(
            SavingsPlan::from_goal(Some(completed.clone())),
            SavingsPlan::Completed(completed)
        );
    }

    #[test]
    fn goal_json_uses_tri_state_marks() {
        let goal = SavingsGoal {
            goal_name: "Laptop".to_owned(),
            target_amount: dec!(9000),
            duration_months: 3,
            cadence: Cadence::Daily,
            per_period_amount: dec!(100),
            marks: PeriodMarks::from([(0, PeriodMark::Saved), (2, PeriodMark::Missed)]),
            completed: false,
        };

        let json = serde_json::to_value(&goal).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "goalName": "Laptop",
                "targetAmount": 9000.0,
                "durationMonths": 3,
                "cadence": "daily",
                "perPeriodAmount": 100.0,
                "marks": {"0": true, "2": false},
                "completed": false,
            })
        );
    }

    #[test]
    fn goal_json_treats_null_marks_as_unset() {
        let json = r#"{
            "goalName": "Laptop",
            "targetAmount": 9000,
            "durationMonths": 3,
            "cadence": "weekly",
            "perPeriodAmount": 750,
            "marks": {"0": true, "1": null, "5": false}
        }"#;

        let goal: SavingsGoal = serde_json::from_str(json).unwrap();

        assert_eq!(
            goal.marks,
            PeriodMarks::from([(0, PeriodMark::Saved), (5, PeriodMark::Missed)])
        );
        assert!(!goal.completed);
    }
}
