//! Markup for the savings page and the fragments its endpoints return.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, format_currency, loading_spinner,
    },
    savings::{
        SavingsEstimate, SavingsGoal,
        planner::{Cadence, MAX_DURATION_MONTHS, PeriodMark, period_labels},
        quotes::{QUOTE_ROTATION_SECONDS, next_quote_index, quote_at},
    },
    transaction::MAX_AMOUNT,
};

const PERIOD_BUTTON_STYLE: &str = "px-2 py-1 text-xs font-medium rounded border \
    disabled:cursor-not-allowed";
const PERIOD_SAVED_STYLE: &str = "bg-green-500 border-green-600 text-white";
const PERIOD_MISSED_STYLE: &str = "bg-red-500 border-red-600 text-white";
const PERIOD_UNSET_STYLE: &str = "bg-white border-gray-300 text-gray-900 \
    dark:bg-gray-700 dark:border-gray-600 dark:text-white";

/// The values to prefill the goal form with.
#[derive(Debug, Default)]
pub(super) struct GoalFormValues<'a> {
    pub goal_name: &'a str,
    pub target_amount: &'a str,
    pub duration_months: &'a str,
    pub cadence: Option<Cadence>,
}

/// The goal form, wrapped in the container that estimates are swapped into.
pub(super) fn goal_form_view(values: &GoalFormValues, estimate: Option<&SavingsEstimate>) -> Markup {
    html!(
        div id="savings-form" class="w-full max-w-md space-y-4"
        {
            form
                hx-post=(endpoints::SAVINGS_ESTIMATE)
                hx-target="#savings-form"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class={ (CARD_STYLE) " space-y-4" }
            {
                h2 class="text-lg font-semibold" { "Plan a savings goal" }

                div
                {
                    label for="goal_name" class=(FORM_LABEL_STYLE) { "What are you saving for?" }
                    input
                        type="text"
                        name="goal_name"
                        id="goal_name"
                        value=(values.goal_name)
                        placeholder="New laptop"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="target_amount" class=(FORM_LABEL_STYLE) { "Target amount" }
                    div class="input-wrapper"
                    {
                        input
                            type="number"
                            name="target_amount"
                            id="target_amount"
                            value=(values.target_amount)
                            step="0.01"
                            min="0.01"
                            max=(MAX_AMOUNT.to_string())
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="duration_months" class=(FORM_LABEL_STYLE) { "Duration (months)" }
                    input
                        type="number"
                        name="duration_months"
                        id="duration_months"
                        value=(values.duration_months)
                        step="1"
                        min="1"
                        max=(MAX_DURATION_MONTHS)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="cadence" class=(FORM_LABEL_STYLE) { "How often will you save?" }
                    select name="cadence" id="cadence" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for cadence in Cadence::ALL {
                            option
                                value=(cadence.as_str())
                                selected[values.cadence == Some(cadence)]
                            {
                                (cadence_label(cadence))
                            }
                        }
                    }
                }

                button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    " Calculate"
                }
            }

            @if let Some(estimate) = estimate {
                (estimate_view(estimate))
            }
        }
    )
}

fn cadence_label(cadence: Cadence) -> &'static str {
    match cadence {
        Cadence::Daily => "Daily",
        Cadence::Weekly => "Weekly",
        Cadence::Monthly => "Monthly",
    }
}

fn estimate_view(estimate: &SavingsEstimate) -> Markup {
    let period_name = estimate.cadence.period_name().to_lowercase();

    html!(
        div class={ (CARD_STYLE) " space-y-4" } data-estimate="true"
        {
            p
            {
                "To save " (format_currency(estimate.target_amount))
                @if !estimate.goal_name.is_empty() {
                    " for " (estimate.goal_name)
                }
                " in " (estimate.duration_months) " months, put aside "
                strong data-per-period-amount="true" { (format_currency(estimate.per_period_amount)) }
                " every " (period_name) " for " (estimate.period_count) " " (period_name) "s."
            }

            form hx-post=(endpoints::SAVINGS_GOAL) hx-target-error="#alert-container"
            {
                input type="hidden" name="goal_name" value=(estimate.goal_name);
                input type="hidden" name="target_amount" value=(estimate.target_amount.to_string());
                input type="hidden" name="duration_months" value=(estimate.duration_months);
                input type="hidden" name="cadence" value=(estimate.cadence.as_str());

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Start saving" }
            }
        }
    )
}

fn mark_name(mark: Option<&PeriodMark>) -> &'static str {
    match mark {
        Some(PeriodMark::Saved) => "saved",
        Some(PeriodMark::Missed) => "missed",
        None => "unset",
    }
}

/// The goal's progress and the grid of periods to mark.
pub(super) fn goal_view(goal: &SavingsGoal) -> Markup {
    let progress = goal.progress_percent();
    let labels = period_labels(goal.cadence, goal.period_count());
    let period_name = goal.cadence.period_name().to_lowercase();

    html!(
        div id="savings-goal" class={ (CARD_STYLE) " w-full max-w-3xl space-y-6" }
        {
            div
            {
                h2 class="text-xl font-semibold" { (goal.goal_name) }
                p class="text-gray-600 dark:text-gray-400"
                {
                    "Save "
                    strong data-per-period-amount="true" { (format_currency(goal.per_period_amount)) }
                    " every " (period_name) " to reach " (format_currency(goal.target_amount)) "."
                }
            }

            div
            {
                div class="flex justify-between mb-1 text-sm font-medium"
                {
                    span { "Progress" }
                    span data-progress="true" { (format!("{progress:.0}%")) }
                }
                div class="w-full bg-gray-200 rounded-full h-2.5 dark:bg-gray-700"
                {
                    div
                        class="bg-green-600 h-2.5 rounded-full"
                        style=(format!("width: {progress:.2}%"))
                    {}
                }
            }

            @if goal.completed {
                p class="text-green-700 dark:text-green-400 font-semibold" data-completed="true"
                {
                    "Congratulations, you reached your goal!"
                }
            }

            div class="grid grid-cols-3 sm:grid-cols-6 lg:grid-cols-8 gap-2"
            {
                @for (index, label) in labels.iter().enumerate() {
                    @let mark = goal.marks.get(&(index as u32));
                    @let mark_style = match mark {
                        Some(PeriodMark::Saved) => PERIOD_SAVED_STYLE,
                        Some(PeriodMark::Missed) => PERIOD_MISSED_STYLE,
                        None => PERIOD_UNSET_STYLE,
                    };

                    button
                        type="button"
                        hx-post=(endpoints::format_endpoint(endpoints::SAVINGS_MARK, index))
                        hx-target="#savings-goal"
                        hx-swap="outerHTML"
                        hx-target-error="#alert-container"
                        disabled[goal.completed]
                        data-mark=(mark_name(mark))
                        class={ (PERIOD_BUTTON_STYLE) " " (mark_style) }
                    {
                        (label)
                    }
                }
            }

            div class="flex gap-4"
            {
                button
                    type="button"
                    hx-post=(endpoints::SAVINGS_RESET)
                    hx-confirm="Discard this goal and start over?"
                    hx-target-error="#alert-container"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Reset"
                }

                button
                    type="button"
                    id="complete-goal"
                    hx-post=(endpoints::SAVINGS_RESET)
                    hx-target-error="#alert-container"
                    disabled[!goal.completed]
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    "Completed"
                }
            }
        }
    )
}

/// A quote that replaces itself with the next one every few seconds.
pub(super) fn quote_view(index: usize) -> Markup {
    let quote = quote_at(index);
    let next_url = format!(
        "{}?index={}",
        endpoints::SAVINGS_QUOTE,
        next_quote_index(index)
    );

    html!(
        figure
            id="savings-quote"
            class="w-full max-w-3xl text-center text-gray-700 dark:text-gray-300"
            hx-get=(next_url)
            hx-trigger={ "every " (QUOTE_ROTATION_SECONDS) "s" }
            hx-swap="outerHTML"
        {
            blockquote class="italic" { "\u{201c}" (quote.text) "\u{201d}" }
            figcaption class="mt-2 text-sm" { "- " (quote.author) }
        }
    )
}
