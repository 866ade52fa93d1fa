//! Table of the most recent transactions.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::{DATE_FORMAT, Transaction},
};

pub(super) fn recent_transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        section class="w-full mx-auto mb-8" {
            div class="flex justify-between items-baseline mb-4" {
                h3 class="text-xl font-semibold" { "Recent Transactions" }
                a href=(endpoints::TRANSACTIONS_VIEW) class={ "text-sm " (LINK_STYLE) } {
                    "View all"
                }
            }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        }
                    }
                    tbody {
                        @for transaction in transactions {
                            tr class=(TABLE_ROW_STYLE) data-transaction-row="true" {
                                td class=(TABLE_CELL_STYLE) {
                                    (transaction.date.format(DATE_FORMAT).unwrap_or_default())
                                }
                                td class=(TABLE_CELL_STYLE) { (transaction.category.as_str()) }
                                td class={ (TABLE_CELL_STYLE) " text-right" } {
                                    (format_currency(transaction.amount))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
