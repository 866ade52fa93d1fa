//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use time::Date;

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// A single piece of user input that was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidField {
    /// The transaction date was empty or not in the format YYYY-MM-DD.
    #[error("the date \"{0}\" is not a valid date, expected YYYY-MM-DD")]
    Date(String),

    /// The category is not one of the known categories.
    #[error("\"{0}\" is not a valid category")]
    Category(String),

    /// The amount was not a number, was larger than
    /// [MAX_AMOUNT](crate::transaction::MAX_AMOUNT) or had fractions of a cent.
    #[error(
        "the amount \"{0}\" is not a valid amount, expected a number no larger than \
        999,999,999,999.99 with at most two decimal places"
    )]
    Amount(String),

    /// The start of a date range was missing or malformed.
    #[error("the start date \"{0}\" is not a valid date, expected YYYY-MM-DD")]
    RangeStart(String),

    /// The end of a date range was missing or malformed.
    #[error("the end date \"{0}\" is not a valid date, expected YYYY-MM-DD")]
    RangeEnd(String),

    /// The start of a date range came after its end.
    #[error("the start date {from} is after the end date {to}")]
    RangeOrder {
        /// The start of the range.
        from: Date,
        /// The end of the range.
        to: Date,
    },

    /// The savings target was not a positive, storable amount.
    #[error(
        "the target amount must be a number greater than zero and no larger than \
        999,999,999,999.99 with at most two decimal places"
    )]
    TargetAmount,

    /// The savings duration was not a whole number of months between one and
    /// [MAX_DURATION_MONTHS](crate::savings::MAX_DURATION_MONTHS).
    #[error("the duration must be a whole number of months from 1 to 1200")]
    Duration,

    /// The savings cadence is not daily, weekly or monthly.
    #[error("\"{0}\" is not a valid savings frequency")]
    Cadence(String),

    /// A savings period index outside the plan.
    #[error("period {index} is outside of the plan's {period_count} periods")]
    PeriodIndex {
        /// The requested period.
        index: u32,
        /// The number of periods in the plan.
        period_count: u32,
    },
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted input that failed validation.
    ///
    /// Every rejected field is listed so the user can fix them all at once.
    /// Nothing is committed when this error is returned.
    #[error("invalid input: {}", join_fields(.0))]
    ValidationError(Vec<InvalidField>),

    /// A stored value could not be read or parsed.
    ///
    /// Loading recovers from this error by falling back to empty data, so it
    /// should only ever be logged.
    #[error("could not read stored data: {0}")]
    PersistenceReadError(String),

    /// The persistent store rejected a write.
    #[error("could not save data: {0}")]
    PersistenceWriteError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A savings action that needs a confirmed goal was attempted without one.
    #[error("there is no active savings goal")]
    NoActiveGoal,

    /// A completed savings goal cannot be changed, only reset.
    #[error("the savings goal has already been completed")]
    GoalCompleted,

    /// A new savings goal cannot be planned while one is in progress.
    #[error("a savings goal is already in progress")]
    GoalAlreadyActive,

    /// A savings goal was confirmed before its schedule was estimated.
    #[error("there is no savings estimate to confirm")]
    MissingEstimate,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the lock on the transaction store
    #[error("could not acquire the store lock")]
    StoreLockError,
}

fn join_fields(fields: &[InvalidField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn capitalise_first(text: impl Display) -> String {
    let text = text.to_string();
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => text,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            Error::PersistenceWriteError(_) => InternalServerError {
                description: "Save Failed",
                fix: "Your changes could not be saved. Please try again.",
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::ValidationError(fields) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Please check your input".to_owned(),
                    details: fields
                        .iter()
                        .map(|field| format!("{}.", capitalise_first(field)))
                        .collect::<Vec<_>>()
                        .join(" "),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete transaction".to_owned(),
                    details: "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                        .to_owned(),
                },
            ),
            Error::NoActiveGoal => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "No active savings goal".to_owned(),
                    details: "Create and confirm a savings goal before tracking your progress."
                        .to_owned(),
                },
            ),
            Error::GoalCompleted => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Savings goal already completed".to_owned(),
                    details: "Reset the goal to start a new savings plan.".to_owned(),
                },
            ),
            Error::GoalAlreadyActive => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Savings goal in progress".to_owned(),
                    details: "Reset the current goal before planning a new one.".to_owned(),
                },
            ),
            Error::MissingEstimate => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Nothing to confirm".to_owned(),
                    details: "Calculate how much to save before confirming the plan.".to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::PersistenceWriteError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not save your changes".to_owned(),
                    details: "Nothing was changed. Try again later or check the server logs."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use time::macros::date;

    use super::{Error, InvalidField};

    #[test]
    fn validation_error_lists_every_field() {
        let error = Error::ValidationError(vec![
            InvalidField::Date(String::new()),
            InvalidField::Amount("abc".to_owned()),
        ]);

        assert_eq!(
            error.to_string(),
            "invalid input: the date \"\" is not a valid date, expected YYYY-MM-DD; \
            the amount \"abc\" is not a valid amount, expected a number no larger than \
            999,999,999,999.99 with at most two decimal places"
        );
    }

    #[test]
    fn range_order_mentions_both_dates() {
        let field = InvalidField::RangeOrder {
            from: date!(2025 - 02 - 01),
            to: date!(2025 - 01 - 01),
        };

        assert_eq!(
            field.to_string(),
            "the start date 2025-02-01 is after the end date 2025-01-01"
        );
    }

    #[test]
    fn validation_error_alert_is_bad_request() {
        let response =
            Error::ValidationError(vec![InvalidField::TargetAmount]).into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn completed_goal_alert_is_conflict() {
        let response = Error::GoalCompleted.into_alert_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
