use chrono::{Duration, NaiveDate};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the "last 12 months" window, counted back from the latest measurement date.
pub(crate) const LOOKBACK_DAYS: i64 = 365;

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// The first date of the lookback window ending at `latest`, formatted `YYYY-MM-DD`.
///
/// Returns `None` when `latest` is not a valid date.
pub(crate) fn lookback_start(latest: &str) -> Option<String> {
    let latest = parse_date(latest)?;
    let start = latest.checked_sub_signed(Duration::days(LOOKBACK_DAYS))?;
    Some(start.format(DATE_FORMAT).to_string())
}

/// Rounds to one decimal place, exact halves to the even neighbour.
pub(crate) fn round_to_tenth(value: Option<f64>) -> Option<f64> {
    value.map(|v| (v * 10.0).round_ties_even() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookback_start() {
        assert_eq!(lookback_start("2017-08-23").as_deref(), Some("2016-08-23"));
        assert_eq!(lookback_start("2017-03-01").as_deref(), Some("2016-03-01"));
    }

    #[test]
    fn test_lookback_start_crosses_leap_day() {
        // 2016-02-29 lies inside the window, so the start lands one calendar day later.
        assert_eq!(lookback_start("2016-08-23").as_deref(), Some("2015-08-24"));
    }

    #[test]
    fn test_lookback_start_invalid() {
        assert_eq!(lookback_start("2017-13-01"), None);
        assert_eq!(lookback_start("yesterday"), None);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(Some(77.666_666)), Some(77.7));
        assert_eq!(round_to_tenth(Some(74.8)), Some(74.8));
        assert_eq!(round_to_tenth(Some(75.875)), Some(75.9));
        assert_eq!(round_to_tenth(Some(-3.04)), Some(-3.0));
        assert_eq!(round_to_tenth(None), None);
    }

    #[test]
    fn test_round_to_tenth_halves_to_even() {
        assert_eq!(round_to_tenth(Some(72.25)), Some(72.2));
        assert_eq!(round_to_tenth(Some(72.75)), Some(72.8));
        assert_eq!(round_to_tenth(Some(-0.25)), Some(-0.2));
    }
}
