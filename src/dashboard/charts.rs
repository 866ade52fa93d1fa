//! The dashboard's chart of the most recent month.

use charming::{
    Chart,
    component::{Legend, Title},
    series::Pie,
};
use time::Month;

use crate::{
    aggregation::MonthlySummary,
    charts::{chart_value, item_tooltip},
};

/// A pie chart splitting the month into income, expenses and savings.
pub(super) fn monthly_summary_chart(year: i32, month: Month, summary: &MonthlySummary) -> Chart {
    let data = vec![
        (chart_value(summary.income), "Income".to_owned()),
        (chart_value(summary.expense), "Expenses".to_owned()),
        (chart_value(summary.savings), "Savings".to_owned()),
    ];

    Chart::new()
        .title(
            Title::new()
                .text("This Month")
                .subtext(format!("{month} {year}")),
        )
        .tooltip(item_tooltip())
        .legend(Legend::new().bottom("2%"))
        .series(
            Pie::new()
                .name("Summary")
                .radius(vec!["40%", "65%"])
                .data(data),
        )
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::Month;

    use crate::aggregation::MonthlySummary;

    use super::monthly_summary_chart;

    #[test]
    fn chart_has_each_part_of_the_month() {
        let summary = MonthlySummary {
            income: dec!(5000),
            expense: dec!(150),
            savings: dec!(1000),
        };

        let options = monthly_summary_chart(2025, Month::February, &summary).to_string();

        assert!(options.contains("February 2025"), "got {options}");
        for name in ["Income", "Expenses", "Savings"] {
            assert!(options.contains(name), "want {name} in {options}");
        }
    }
}
