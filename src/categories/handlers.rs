//! The category analysis page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    aggregation::{available_years, monthly_totals_by_category},
    categories::charts::{monthly_share_chart, monthly_trend_chart},
    charts::{ChartView, charts_script, charts_view},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, ECHARTS_SCRIPT, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
    timezone::current_local_date,
    transaction::{Category, TransactionStore},
};

/// The category shown when none is picked.
const DEFAULT_CATEGORY: Category = Category::Debt;

/// The state needed for the categories page.
#[derive(Debug, Clone)]
pub struct CategoriesState {
    pub transaction_store: Arc<Mutex<TransactionStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for CategoriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The year and category to analyse, both optional.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    pub year: Option<i32>,
    pub category: Option<String>,
}

/// Render the monthly share and trend charts for one category in one year.
pub async fn get_categories_page(
    State(state): State<CategoriesState>,
    Query(query): Query<CategoriesQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;
    let transactions = store.list_transactions();

    let year = query.year.unwrap_or(today.year());
    let category = match query.category.as_deref() {
        None | Some("") => DEFAULT_CATEGORY,
        Some(name) => name.parse().unwrap_or_else(|error| {
            tracing::debug!("falling back to {DEFAULT_CATEGORY}: {error}");
            DEFAULT_CATEGORY
        }),
    };

    let totals = monthly_totals_by_category(transactions, year, category);
    let years = available_years(transactions, today.year());
    let has_data = totals.iter().any(|total| !total.is_zero());

    let charts = [
        ChartView {
            id: "category-share-chart",
            options: monthly_share_chart(year, category, &totals).to_string(),
        },
        ChartView {
            id: "category-trend-chart",
            options: monthly_trend_chart(year, category, &totals).to_string(),
        },
    ];

    Ok(categories_view(&years, year, category, has_data, &charts).into_response())
}

fn categories_view(
    years: &[i32],
    selected_year: i32,
    selected_category: Category,
    has_data: bool,
    charts: &[ChartView],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-6"
            {
                h1 class="text-2xl font-bold" { "Categories" }

                (picker_form(years, selected_year, selected_category))

                @if has_data {
                    (charts_view(charts))
                } @else {
                    p data-empty-state="true" class="text-gray-600 dark:text-gray-400"
                    {
                        "No " (selected_category.as_str()) " transactions in " (selected_year) "."
                    }
                }
            }
        }
    );

    let head_elements: Vec<HeadElement> = if has_data {
        vec![
            HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
            charts_script(charts),
        ]
    } else {
        Vec::new()
    };

    base("Categories", &head_elements, &content)
}

fn picker_form(years: &[i32], selected_year: i32, selected_category: Category) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::CATEGORIES_VIEW)
            class="flex flex-col sm:flex-row sm:items-end gap-4"
        {
            div
            {
                label for="year" class=(FORM_LABEL_STYLE) { "Year" }
                select name="year" id="year" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for year in years {
                        option value=(year) selected[*year == selected_year] { (year) }
                    }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in Category::ALL {
                        option value=(category.as_str()) selected[category == selected_category]
                        {
                            (category.as_str())
                        }
                    }
                }
            }

            div class="sm:w-32"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Show" }
            }
        }
    )
}
