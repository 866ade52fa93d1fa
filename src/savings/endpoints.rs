//! Endpoints for estimating, confirming, tracking and resetting a savings goal.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    Error, endpoints,
    savings::{
        SavingsEstimate, SavingsPlan,
        page::SavingsState,
        views::{GoalFormValues, goal_form_view, goal_view, quote_view},
    },
};

/// The raw goal form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GoalForm {
    pub goal_name: String,
    pub target_amount: String,
    pub duration_months: String,
    pub cadence: String,
}

impl GoalForm {
    fn to_estimate(&self) -> Result<SavingsEstimate, Error> {
        SavingsEstimate::new(
            &self.goal_name,
            &self.target_amount,
            &self.duration_months,
            &self.cadence,
        )
    }
}

/// A route handler that calculates the per-period amount and returns the goal
/// form with the estimate and a button to confirm it.
pub async fn estimate_savings_endpoint(
    State(state): State<SavingsState>,
    Form(form): Form<GoalForm>,
) -> Response {
    let store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let plan = SavingsPlan::from_goal(store.get_savings_goal().cloned());
    let plan = match form.to_estimate().and_then(|estimate| plan.estimate(estimate)) {
        Ok(plan) => plan,
        Err(error) => {
            tracing::info!("could not estimate savings: {error}");
            return error.into_alert_response();
        }
    };

    let SavingsPlan::Estimated(estimate) = &plan else {
        return Error::MissingEstimate.into_alert_response();
    };

    let values = GoalFormValues {
        goal_name: &form.goal_name,
        target_amount: &form.target_amount,
        duration_months: &form.duration_months,
        cadence: Some(estimate.cadence),
    };

    goal_form_view(&values, Some(estimate)).into_response()
}

/// A route handler that stores the estimated goal, redirects to the savings view on success.
pub async fn confirm_savings_goal_endpoint(
    State(state): State<SavingsState>,
    Form(form): Form<GoalForm>,
) -> Response {
    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let plan = SavingsPlan::from_goal(store.get_savings_goal().cloned());
    let confirmed = form
        .to_estimate()
        .and_then(|estimate| plan.estimate(estimate))
        .and_then(|plan| plan.confirm());

    let result = confirmed.and_then(|plan| store.set_savings_goal(plan.into_goal()));
    if let Err(error) = result {
        tracing::info!("could not confirm savings goal: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::SAVINGS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

/// A route handler that cycles the mark on one period and returns the updated goal.
pub async fn toggle_period_mark_endpoint(
    State(state): State<SavingsState>,
    Path(period_index): Path<u32>,
) -> Response {
    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let plan = match SavingsPlan::from_goal(store.get_savings_goal().cloned()).toggle(period_index)
    {
        Ok(plan) => plan,
        Err(error) => {
            tracing::info!("could not mark period {period_index}: {error}");
            return error.into_alert_response();
        }
    };

    let Some(goal) = plan.into_goal() else {
        return Error::NoActiveGoal.into_alert_response();
    };

    if let Err(error) = store.set_savings_goal(Some(goal.clone())) {
        tracing::error!("could not save savings goal: {error}");
        return error.into_alert_response();
    }

    goal_view(&goal).into_response()
}

/// A route handler that discards the savings goal, redirects to the savings view.
pub async fn reset_savings_goal_endpoint(State(state): State<SavingsState>) -> Response {
    let mut store = match state.transaction_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let plan = SavingsPlan::from_goal(store.get_savings_goal().cloned()).reset();

    if let Err(error) = store.set_savings_goal(plan.into_goal()) {
        tracing::error!("could not reset savings goal: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::SAVINGS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteQuery {
    #[serde(default)]
    pub index: usize,
}

/// A route handler that returns the quote at `index`.
pub async fn get_savings_quote(Query(query): Query<QuoteQuery>) -> Response {
    quote_view(query.index).into_response()
}
