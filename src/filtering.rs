use crate::types::table::{DATE, STATION};
use polars::prelude::{col, lit, LazyFrame};

/// Row filters over the `measurement` table.
///
/// Dates are compared as plain strings: the inputs are not parsed, so a value that is not a
/// `YYYY-MM-DD` date still yields a well-defined (usually empty) selection.
pub trait ClimateFrameFilterExt {
    /// Keeps rows with `date >= start`.
    fn filter_since(self, start: &str) -> LazyFrame;

    /// Keeps rows with `date <= end`.
    fn filter_until(self, end: &str) -> LazyFrame;

    /// Keeps rows with `start <= date <= end`. Empty when `start > end`.
    fn filter_between(self, start: &str, end: &str) -> LazyFrame;

    /// Keeps rows reported by `station`.
    fn filter_station(self, station: &str) -> LazyFrame;
}

impl ClimateFrameFilterExt for LazyFrame {
    fn filter_since(self, start: &str) -> LazyFrame {
        self.filter(col(DATE).gt_eq(lit(start)))
    }

    fn filter_until(self, end: &str) -> LazyFrame {
        self.filter(col(DATE).lt_eq(lit(end)))
    }

    fn filter_between(self, start: &str, end: &str) -> LazyFrame {
        self.filter_since(start).filter_until(end)
    }

    fn filter_station(self, station: &str) -> LazyFrame {
        self.filter(col(STATION).eq(lit(station)))
    }
}
