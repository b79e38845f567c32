//! Peak period classification.
//!
//! Peak rates apply inside a fixed annual window compared on month and day
//! only. No timezone handling happens here; callers pass a date already in
//! the reference timezone.

use chrono::{Datelike, NaiveDate};

use crate::config::PeakWindow;

/// Determines whether `date` falls in the peak window.
///
/// Months strictly between the start and end month are always peak; in the
/// start month only days on or after the start day are peak; in the end
/// month only days on or before the end day are peak.
///
/// # Example
///
/// ```
/// use tariff_engine::calculation::is_peak_period;
/// use tariff_engine::config::PeakWindow;
/// use chrono::NaiveDate;
///
/// let window = PeakWindow::default();
/// assert!(is_peak_period(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(), &window));
/// assert!(!is_peak_period(NaiveDate::from_ymd_opt(2024, 5, 14).unwrap(), &window));
/// assert!(is_peak_period(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(), &window));
/// assert!(!is_peak_period(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(), &window));
/// ```
pub fn is_peak_period(date: NaiveDate, window: &PeakWindow) -> bool {
    let month = date.month();
    let day = date.day();
    let (start, end) = (window.start, window.end);

    if start.month == end.month {
        return month == start.month && day >= start.day && day <= end.day;
    }
    if month > start.month && month < end.month {
        return true;
    }
    if month == start.month {
        return day >= start.day;
    }
    if month == end.month {
        return day <= end.day;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonthDay;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_boundary_is_peak() {
        let window = PeakWindow::default();
        assert!(is_peak_period(date(2024, 5, 15), &window));
        assert!(!is_peak_period(date(2024, 5, 14), &window));
    }

    #[test]
    fn test_end_boundary_is_peak() {
        let window = PeakWindow::default();
        assert!(is_peak_period(date(2024, 9, 30), &window));
        assert!(!is_peak_period(date(2024, 10, 1), &window));
    }

    #[test]
    fn test_months_outside_window_are_not_peak() {
        let window = PeakWindow::default();
        for month in [1, 2, 3, 4, 10, 11, 12] {
            assert!(!is_peak_period(date(2024, month, 15), &window));
        }
    }

    #[test]
    fn test_single_month_window() {
        let window = PeakWindow {
            start: MonthDay::new(7, 10),
            end: MonthDay::new(7, 20),
        };
        assert!(is_peak_period(date(2024, 7, 10), &window));
        assert!(is_peak_period(date(2024, 7, 20), &window));
        assert!(!is_peak_period(date(2024, 7, 21), &window));
        assert!(!is_peak_period(date(2024, 8, 15), &window));
    }

    proptest! {
        #[test]
        fn prop_any_day_in_summer_months_is_peak(
            year in 2000i32..2100,
            month in 6u32..=8,
            day in 1u32..=30,
        ) {
            let window = PeakWindow::default();
            prop_assert!(is_peak_period(date(year, month, day), &window));
        }

        #[test]
        fn prop_classification_is_year_independent(
            year_a in 1990i32..2100,
            year_b in 1990i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
        ) {
            let window = PeakWindow::default();
            prop_assert_eq!(
                is_peak_period(date(year_a, month, day), &window),
                is_peak_period(date(year_b, month, day), &window)
            );
        }
    }
}
