//! Rendering of ECharts charts configured with `charming`.
//!
//! Each chart is serialised as JSON on the server, placed in an empty
//! container div and drawn in the browser by a small initialisation script.

use charming::element::{JsFunction, Tooltip, Trigger};
use maud::{Markup, PreEscaped, html};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::html::HeadElement;

/// A chart with its HTML container ID and ECharts configuration.
pub struct ChartView {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for `charts`.
pub fn charts_view(charts: &[ChartView]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for `charts`.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub fn charts_script(charts: &[ChartView]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Formats chart values as rupees in the browser.
#[inline]
pub fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// A tooltip for pie slices that shows the value as rupees.
pub fn item_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Item)
        .value_formatter(currency_formatter())
}

/// ECharts only understands floats, the precision lost here is display only.
pub fn chart_value(amount: Decimal) -> f64 {
    amount.round_dp(2).to_f64().unwrap_or_default()
}
