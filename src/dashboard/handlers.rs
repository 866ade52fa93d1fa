//! Dashboard HTTP handlers and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    aggregation::{monthly_summary, overall_totals, recent_month, recent_transactions},
    charts::{ChartView, charts_script, charts_view},
    dashboard::{cards::totals_cards_view, charts::monthly_summary_chart, tables::recent_transactions_table},
    endpoints,
    html::{ECHARTS_SCRIPT, HeadElement, base, link},
    navigation::NavBar,
    timezone::current_local_date,
    transaction::TransactionStore,
};

/// The number of transactions shown in the recent transactions table.
const RECENT_TRANSACTION_COUNT: usize = 4;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The user's transactions.
    pub transaction_store: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the user's data.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;
    let transactions = store.list_transactions();

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let totals = overall_totals(transactions);
    let (year, month) = recent_month(transactions, today);
    let summary = monthly_summary(transactions, year, month);
    let charts = [ChartView {
        id: "summary-chart",
        options: monthly_summary_chart(year, month, &summary).to_string(),
    }];

    let content = html!(
        (totals_cards_view(&totals))
        (charts_view(&charts))
        (recent_transactions_table(recent_transactions(transactions, RECENT_TRANSACTION_COUNT)))
    );

    Ok(dashboard_view(nav_bar, &charts, &content).into_response())
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::TRANSACTIONS_VIEW, "transactions page");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Your totals and charts will show up here once you add some transactions.
                You can add transactions on the " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn dashboard_view(nav_bar: NavBar, charts: &[ChartView], content: &Markup) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (content)
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}
