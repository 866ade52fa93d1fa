//! Card components for the overall totals.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    aggregation::OverallTotals,
    html::{CARD_STYLE, format_currency},
};

const TEXT_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TEXT_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Renders the balance, income and expense cards.
///
/// Expenses are shown as a positive amount.
pub(super) fn totals_cards_view(totals: &OverallTotals) -> Markup {
    let balance_style = if totals.balance < Decimal::ZERO {
        TEXT_RED_STYLE
    } else {
        TEXT_GREEN_STYLE
    };

    html! {
        section class="w-full mx-auto mb-8" {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                (total_card("balance", "Balance", totals.balance, balance_style))
                (total_card("income", "Income", totals.income, TEXT_GREEN_STYLE))
                (total_card("expenses", "Expenses", totals.expense.abs(), TEXT_RED_STYLE))
            }
        }
    }
}

fn total_card(id: &str, title: &str, amount: Decimal, amount_style: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) data-card=(id) {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            p class={ "mt-2 text-2xl font-bold " (amount_style) } data-amount="true" {
                (format_currency(amount))
            }
        }
    }
}
