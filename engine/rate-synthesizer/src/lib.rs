//! Competitor Rate Synthesizer
//!
//! Derives deterministic competitor rates, availability, ratings and trends
//! for the revenue-management dashboard from a selected competitor set, a
//! base rate and a position in the displayed date range.

pub mod calculator;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod roster;


pub use calculator::synthesize;
pub use calendar::{DailyMarketSummary, RangeOverview, RateCalendar};
pub use config::SynthesizerConfig;
pub use error::{Result, SynthError};
pub use logging::initialize_logging;
pub use models::*;
pub use roster::CompetitorRoster;
