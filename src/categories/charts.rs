//! Charts for the category analysis page.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::{Line, Pie},
};
use rust_decimal::Decimal;
use time::Month;

use crate::{
    charts::{chart_value, currency_formatter, item_tooltip},
    transaction::Category,
};

/// Short month names, January first.
pub(super) fn month_labels() -> Vec<String> {
    let mut month = Month::January;

    (0..12)
        .map(|_| {
            let label = month.to_string()[..3].to_owned();
            month = month.next();
            label
        })
        .collect()
}

/// Each month's share of the year's total for `category`.
///
/// Slices use absolute values so that income and spending categories read
/// the same way, months with no transactions are left out.
pub(super) fn monthly_share_chart(year: i32, category: Category, totals: &[Decimal; 12]) -> Chart {
    let data: Vec<(f64, String)> = month_labels()
        .into_iter()
        .zip(totals)
        .filter(|(_, total)| !total.is_zero())
        .map(|(label, total)| (chart_value(total.abs()), label))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text(format!("{category} by Month"))
                .subtext(year.to_string()),
        )
        .tooltip(item_tooltip())
        .legend(Legend::new().bottom("2%"))
        .series(Pie::new().name(category.as_str()).radius("55%").data(data))
}

/// The signed total of `category` in each month of `year`.
pub(super) fn monthly_trend_chart(year: i32, category: Category, totals: &[Decimal; 12]) -> Chart {
    let values: Vec<f64> = totals.iter().copied().map(chart_value).collect();

    Chart::new()
        .title(
            Title::new()
                .text(format!("{category} Trend"))
                .subtext(year.to_string()),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(month_labels()))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name(category.as_str()).data(values))
}
