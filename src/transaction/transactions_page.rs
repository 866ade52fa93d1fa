//! The page for adding, filtering and listing transactions.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    aggregation::{BalanceRow, SortOrder, filter_by_date_range, running_balances},
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
        loading_spinner, rupee_input_styles,
    },
    navigation::NavBar,
    timezone::current_local_date,
    transaction::{Category, DATE_FORMAT, MAX_AMOUNT, Transaction, TransactionStore},
};

use super::delete_endpoint::TRANSACTIONS_CHANGED_EVENT;

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
    pub transaction_store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The optional date range to filter the table by.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RangeQuery {
    fn is_empty(&self) -> bool {
        self.from.as_deref().unwrap_or_default().is_empty()
            && self.to.as_deref().unwrap_or_default().is_empty()
    }

    fn to_url(&self) -> String {
        if self.is_empty() {
            return endpoints::TRANSACTIONS_VIEW.to_owned();
        }

        let query = serde_urlencoded::to_string([
            ("from", self.from.as_deref().unwrap_or_default()),
            ("to", self.to.as_deref().unwrap_or_default()),
        ])
        .unwrap_or_default();

        format!("{}?{query}", endpoints::TRANSACTIONS_VIEW)
    }
}

/// Render the add form, the range filter and the transactions table.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<RangeQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let store = state
        .transaction_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;
    let transactions = store.list_transactions();

    let (filtered, range_error) = if query.is_empty() {
        (None, None)
    } else {
        match filter_by_date_range(
            transactions,
            query.from.as_deref().unwrap_or_default(),
            query.to.as_deref().unwrap_or_default(),
        ) {
            Ok(filtered) => (Some(filtered), None),
            Err(error) => {
                tracing::debug!("ignoring invalid date range: {error}");
                (None, Some(error))
            }
        }
    };

    let rows = match &filtered {
        Some(filtered) => running_balances(filtered, SortOrder::Ascending),
        None => running_balances(transactions, SortOrder::Descending),
    };

    Ok(transactions_view(&rows, &query, range_error.as_ref(), today).into_response())
}

fn transactions_view(
    rows: &[BalanceRow<'_>],
    query: &RangeQuery,
    range_error: Option<&Error>,
    today: Date,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let today = today.format(DATE_FORMAT).unwrap_or_default();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl space-y-6"
            {
                h1 class="text-2xl font-bold" { "Transactions" }

                div class="grid gap-6 md:grid-cols-2"
                {
                    (add_transaction_form(&today))
                    (range_filter_form(query, range_error))
                }

                (transactions_table(rows, query))
            }
        }
    );

    base("Transactions", &[rupee_input_styles()], &content)
}

fn add_transaction_form(today: &str) -> Markup {
    html!(
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            class={ (CARD_STYLE) " space-y-4" }
        {
            h2 class="text-lg font-semibold" { "Add transaction" }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                input
                    type="date"
                    name="date"
                    id="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in Category::ALL {
                        option value=(category.as_str()) { (category.as_str()) }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                div class="input-wrapper"
                {
                    input
                        type="number"
                        name="amount"
                        id="amount"
                        step="0.01"
                        min="0"
                        max=(MAX_AMOUNT.to_string())
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) }
                " Add"
            }
        }
    )
}

fn range_filter_form(query: &RangeQuery, range_error: Option<&Error>) -> Markup {
    html!(
        form method="get" action=(endpoints::TRANSACTIONS_VIEW) class={ (CARD_STYLE) " space-y-4" }
        {
            h2 class="text-lg font-semibold" { "Filter by date" }

            div
            {
                label for="from" class=(FORM_LABEL_STYLE) { "From" }
                input
                    type="date"
                    name="from"
                    id="from"
                    value=[query.from.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="to" class=(FORM_LABEL_STYLE) { "To" }
                input
                    type="date"
                    name="to"
                    id="to"
                    value=[query.to.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if let Some(error) = range_error {
                p class="text-sm text-red-600 dark:text-red-400" data-range-error="true"
                {
                    (error.to_string())
                }
            }

            div class="flex gap-2"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Filter" }
                a href=(endpoints::TRANSACTIONS_VIEW) class={ (BUTTON_SECONDARY_STYLE) " text-center" }
                {
                    "Show all"
                }
            }
        }
    )
}

fn transactions_table(rows: &[BalanceRow<'_>], query: &RangeQuery) -> Markup {
    html!(
        div
            id="transactions-table"
            class="relative overflow-x-auto shadow-md sm:rounded-lg"
            hx-get=(query.to_url())
            hx-trigger={ (TRANSACTIONS_CHANGED_EVENT) " from:body" }
            hx-select="#transactions-table"
            hx-swap="outerHTML"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Balance" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (transaction_row(row.transaction, row.balance))
                    }

                    @if rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="5" class={ (TABLE_CELL_STYLE) " text-center" } data-empty-state="true"
                            {
                                "No transactions found."
                            }
                        }
                    }
                }
            }

            @if !rows.is_empty() && query.is_empty() {
                div class="p-4 flex justify-end bg-white dark:bg-gray-800"
                {
                    button
                        type="button"
                        hx-delete=(endpoints::TRANSACTIONS_API)
                        hx-confirm="Delete every transaction? This cannot be undone."
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete all"
                    }
                }
            }
        }
    )
}

fn transaction_row(transaction: &Transaction, balance: Decimal) -> Markup {
    let amount_style = if transaction.is_income() {
        "text-green-700 dark:text-green-400"
    } else {
        "text-red-700 dark:text-red-400"
    };
    let date = transaction.date.format(DATE_FORMAT).unwrap_or_default();
    let delete_url = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id);

    html!(
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true" data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (date) }
            td class=(TABLE_CELL_STYLE) { (transaction.category.as_str()) }
            td class={ (TABLE_CELL_STYLE) " text-right " (amount_style) } data-amount="true"
            {
                (format_currency(transaction.amount))
            }
            td class={ (TABLE_CELL_STYLE) " text-right" } data-balance="true"
            {
                (format_currency(balance))
            }
            td class={ (TABLE_CELL_STYLE) " text-right" }
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-confirm="Delete this transaction?"
                    hx-target="#alert-container"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    )
}
