//! Alert messages shown to the user after a form submission or an HTMX request.
//!
//! Alerts are swapped into the `#alert-container` element of the base page.

use axum::response::Html;
use maud::{Markup, html};

/// A dismissible message rendered as an HTML fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The request succeeded.
    Success { message: String, details: String },
    /// The request failed, `details` should tell the user how to fix it.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }

    fn into_markup(self) -> Markup {
        let (message, details, container_style, icon) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "flex items-start p-4 mb-4 text-green-800 border border-green-300 \
                rounded-lg bg-green-50 dark:bg-gray-800 dark:text-green-400 \
                dark:border-green-800",
                "✓",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "flex items-start p-4 mb-4 text-red-800 border border-red-300 \
                rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400 \
                dark:border-red-800",
                "!",
            ),
        };

        html!(
            div class=(container_style) role="alert"
            {
                span class="shrink-0 me-3 font-bold" aria-hidden="true" { (icon) }

                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p class="mt-1 text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    class="ms-3 -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex items-center \
                        justify-center h-8 w-8 hover:opacity-75"
                    aria-label="Close"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        )
    }
}
