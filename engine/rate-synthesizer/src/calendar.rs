//! Date-range driver for the synthesizer
//!
//! The dashboard shows a window of consecutive nights. Each night is
//! identified by its offset from the first day of the window (the date
//! index) and whether it falls on a weekend.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculator::{mean_half_up, synthesize};
use crate::error::{Result, SynthError};
use crate::models::{CompetitorIdentity, MarketSummary};

/// Market summary for a single night in the displayed range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMarketSummary {
    pub date: NaiveDate,
    pub date_index: i64,
    pub is_weekend: bool,
    pub summary: MarketSummary,
}

/// A contiguous window of nights starting at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateCalendar {
    start: NaiveDate,
    days: u32,
}

impl RateCalendar {
    pub fn new(start: NaiveDate, days: u32) -> Result<Self> {
        if days == 0 {
            return Err(SynthError::InvalidDateRange(
                "range must cover at least one day".into(),
            ));
        }
        start
            .checked_add_signed(Duration::days(i64::from(days) - 1))
            .ok_or_else(|| {
                SynthError::InvalidDateRange(format!(
                    "{days} days from {start} overflows the calendar"
                ))
            })?;
        Ok(Self { start, days })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Last night in the window (inclusive)
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(i64::from(self.days) - 1)
    }

    /// `(date_index, date, is_weekend)` for every night in order
    pub fn dates(&self) -> impl Iterator<Item = (i64, NaiveDate, bool)> + '_ {
        (0..i64::from(self.days)).map(move |offset| {
            let date = self.start + Duration::days(offset);
            (offset, date, is_weekend(date))
        })
    }

    /// Run the synthesizer once per night of the window
    pub fn synthesize(
        &self,
        selected: &[CompetitorIdentity],
        base_rate: f64,
    ) -> Vec<DailyMarketSummary> {
        info!(
            "Synthesizing {} nights from {} for {} competitors at base rate {}",
            self.days,
            self.start,
            selected.len(),
            base_rate
        );

        self.dates()
            .map(|(date_index, date, weekend)| DailyMarketSummary {
                date,
                date_index,
                is_weekend: weekend,
                summary: synthesize(selected, base_rate, date_index, weekend),
            })
            .collect()
    }
}

/// Saturday and Sunday nights carry the weekend surcharge
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Range-wide statistics over a set of nightly summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeOverview {
    pub nights: usize,
    pub weekend_nights: usize,
    pub lowest_rate: i64,
    pub highest_rate: i64,
    /// Mean of the nightly average rates
    pub average_rate: i64,
}

impl RangeOverview {
    pub fn from_days(days: &[DailyMarketSummary]) -> Option<Self> {
        if days.is_empty() {
            return None;
        }

        let lowest_rate = days.iter().map(|d| d.summary.lowest_rate).min()?;
        let highest_rate = days.iter().map(|d| d.summary.highest_rate).max()?;

        Some(Self {
            nights: days.len(),
            weekend_nights: days.iter().filter(|d| d.is_weekend).count(),
            lowest_rate,
            highest_rate,
            average_rate: mean_half_up(days.iter().map(|d| d.summary.average_rate)),
        })
    }
}
