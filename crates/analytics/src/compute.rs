use chrono::{Datelike, Months, NaiveDate};

use apex_db::analytics::models::RatioRow;

/// `numerator / denominator`, or 0 when the denominator is not positive or
/// either operand is not finite. Never yields NaN or infinity.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if !numerator.is_finite() || !denominator.is_finite() || denominator <= 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Share of a count, clamped to [0, 1].
pub fn rate(row: RatioRow) -> f64 {
    safe_ratio(row.numerator as f64, row.denominator as f64).clamp(0.0, 1.0)
}

/// Claims paid over premium revenue; 0 without revenue.
pub fn medical_loss_ratio(total_expenses: f64, total_revenue: f64) -> f64 {
    safe_ratio(total_expenses, total_revenue)
}

pub fn net_income(total_revenue: f64, total_expenses: f64) -> f64 {
    total_revenue - total_expenses
}

/// Cost per member per month; 0 when there are no members or no months.
pub fn per_member_per_month(amount: f64, members: i64, months: usize) -> f64 {
    let member_months = members.max(0) as f64 * months as f64;
    safe_ratio(amount, member_months)
}

/// First day of the earliest month in a trailing window of `months` calendar
/// months ending with the month of `today`.
pub fn trend_window_start(today: NaiveDate, months: u32) -> NaiveDate {
    let first_of_month = today.with_day(1).unwrap_or(today);
    let back = months.max(1) - 1;
    first_of_month
        .checked_sub_months(Months::new(back))
        .unwrap_or(first_of_month)
}

/// `YYYY-MM`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Keep rows whose month lies in `[window_start, today]` and sort them by
/// month ascending.
pub fn normalize_series<T, F>(
    mut rows: Vec<T>,
    window_start: NaiveDate,
    today: NaiveDate,
    month_of: F,
) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let first = month_key(window_start);
    let last = month_key(today);
    rows.retain(|r| {
        let m = month_of(r);
        m >= first.as_str() && m <= last.as_str()
    });
    rows.sort_by(|a, b| month_of(a).cmp(month_of(b)));
    rows
}

/// Round to the nearest half (3.545 -> 3.5, 3.76 -> 4.0).
pub fn round_to_half(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 2.0).round() / 2.0
}
