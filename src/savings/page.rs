//! The savings page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{PAGE_CONTAINER_STYLE, base, rupee_input_styles},
    navigation::NavBar,
    savings::{
        SavingsPlan,
        views::{GoalFormValues, goal_form_view, goal_view, quote_view},
    },
    transaction::TransactionStore,
};

/// The state needed by the savings page and its endpoints.
#[derive(Debug, Clone)]
pub struct SavingsState {
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for SavingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// Render the goal form, or the progress of the confirmed goal.
pub async fn get_savings_page(State(state): State<SavingsState>) -> Result<Response, Error> {
    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let plan = SavingsPlan::from_goal(store.get_savings_goal().cloned());

    Ok(savings_view(&plan).into_response())
}

fn savings_view(plan: &SavingsPlan) -> Markup {
    let nav_bar = NavBar::new(endpoints::SAVINGS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class={ (PAGE_CONTAINER_STYLE) " space-y-6" }
        {
            h1 class="text-2xl font-bold" { "Savings" }

            @match plan.goal() {
                Some(goal) => {
                    (goal_view(goal))
                    (quote_view(0))
                }
                None => (goal_form_view(&GoalFormValues::default(), None)),
            }
        }
    );

    base("Savings", &[rupee_input_styles()], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rust_decimal_macros::dec;
    use scraper::Selector;

    use crate::{
        endpoints,
        persistence::MemoryStore,
        savings::{Cadence, PeriodMarks, SavingsGoal},
        test_utils::{
            assert_hx_endpoint, assert_status_ok, assert_valid_html, must_get_form,
            parse_html_document,
        },
        transaction::TransactionStore,
    };

    use super::{SavingsState, get_savings_page};

    fn get_test_state(goal: Option<SavingsGoal>) -> SavingsState {
        let mut store = TransactionStore::load(Box::new(MemoryStore::new()));
        store.set_savings_goal(goal).unwrap();

        SavingsState {
            transaction_store: Arc::new(Mutex::new(store)),
        }
    }

    #[tokio::test]
    async fn without_goal_shows_goal_form() {
        let response = get_savings_page(State(get_test_state(None))).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::SAVINGS_ESTIMATE, "hx-post");
        assert!(
            html.select(&Selector::parse("#savings-goal").unwrap())
                .next()
                .is_none()
        );
    }

    #[tokio::test]
    async fn with_goal_shows_progress_and_quote() {
        let goal = SavingsGoal {
            goal_name: "Laptop".to_owned(),
            target_amount: dec!(1200),
            duration_months: 3,
            cadence: Cadence::Monthly,
            per_period_amount: dec!(400),
            marks: PeriodMarks::new(),
            completed: false,
        };

        let response = get_savings_page(State(get_test_state(Some(goal)))).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let periods = html
            .select(&Selector::parse("#savings-goal button[data-mark]").unwrap())
            .count();
        assert_eq!(periods, 3);
        html.select(&Selector::parse("#savings-quote").unwrap())
            .next()
            .expect("No quote found");
    }
}
