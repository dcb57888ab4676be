//! Lookback window for repeat avoidance.
//!
//! A movie that was the target on any of the `W` days before the date being
//! selected is not eligible again. The window shrinks for small catalogs so
//! that at least one movie always stays eligible.

use chrono::{Days, NaiveDate};

/// Default number of days whose targets are excluded
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Configured lookback window, in days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    days: u32,
}

impl LookbackWindow {
    pub fn new(days: u32) -> Self {
        Self { days }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Window actually applied for a catalog of `catalog_size` movies.
    ///
    /// At most `catalog_size - 1` days are excluded, so with `n` movies at
    /// most `n - 1` distinct ids can be ruled out.
    pub fn effective_days(&self, catalog_size: usize) -> u32 {
        let cap = u32::try_from(catalog_size.saturating_sub(1)).unwrap_or(u32::MAX);
        self.days.min(cap)
    }

    /// Half-open date range `[start, date)` covered for `date`
    pub fn range_before(&self, date: NaiveDate, catalog_size: usize) -> (NaiveDate, NaiveDate) {
        let days = self.effective_days(catalog_size);
        let start = date
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        (start, date)
    }
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKBACK_DAYS)
    }
}
