//! # Command Line Interface
//!
//! CLI for previewing synthesized competitor rates outside the dashboard.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::calculator::synthesize;
use crate::calendar::{DailyMarketSummary, RangeOverview, RateCalendar};
use crate::config::SynthesizerConfig;
use crate::error::SynthError;
use crate::models::{CompetitorIdentity, MarketSummary};
use crate::roster::CompetitorRoster;

/// Competitor rate synthesizer
#[derive(Parser, Debug)]
#[command(name = "rate-synth")]
#[command(about = "Synthesize competitor rates for the revenue-management dashboard")]
pub struct Cli {
    /// Competitor roster JSON (overrides RATE_SYNTH_ROSTER)
    #[arg(short, long)]
    pub roster: Option<PathBuf>,

    /// Reference rate of the subject property (overrides RATE_SYNTH_BASE_RATE)
    #[arg(short, long)]
    pub base_rate: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply `--roster` and `--base-rate` on top of `config`, then re-validate
    pub fn apply_overrides(&self, config: &mut SynthesizerConfig) -> Result<(), SynthError> {
        if let Some(path) = &self.roster {
            config.roster.path = path.clone();
        }
        if let Some(base_rate) = self.base_rate {
            config.synthesis.base_rate = base_rate;
        }
        config.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize rates for a single night
    Day {
        /// Offset of the night within the displayed range
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        date_index: i64,

        /// Apply the weekend surcharge
        #[arg(long)]
        weekend: bool,

        /// Competitor ids to compare (comma separated); none selects the fallback set
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Synthesize rates for every night in a date range
    Range {
        /// First night (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Number of nights (overrides RATE_SYNTH_RANGE_DAYS)
        #[arg(long)]
        days: Option<u32>,

        /// Competitor ids to compare (comma separated)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// List competitors in the roster
    Roster {
        /// Filter by partial name
        #[arg(long)]
        query: Option<String>,
    },
}

/// CLI handler
pub struct CliHandler {
    config: SynthesizerConfig,
    roster: CompetitorRoster,
    format: OutputFormat,
}

impl CliHandler {
    pub fn new(
        config: SynthesizerConfig,
        roster: CompetitorRoster,
        format: OutputFormat,
    ) -> Self {
        Self {
            config,
            roster,
            format,
        }
    }

    /// Handle CLI commands, returning the rendered output
    pub fn handle_command(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Day {
                date_index,
                weekend,
                ids,
            } => {
                let selected = self.roster.select(&ids);
                let summary = synthesize(
                    &selected,
                    self.config.synthesis.base_rate,
                    date_index,
                    weekend,
                );
                self.render_day(&summary)
            }
            Commands::Range { start, days, ids } => {
                let days = days.unwrap_or(self.config.synthesis.range_days);
                let calendar =
                    RateCalendar::new(start, days).context("Failed to build date range")?;
                let selected = self.roster.select(&ids);
                let nights = calendar.synthesize(&selected, self.config.synthesis.base_rate);
                self.render_range(&nights)
            }
            Commands::Roster { query } => {
                let competitors: Vec<&CompetitorIdentity> = match query {
                    Some(query) => self.roster.search(&query),
                    None => self.roster.all().iter().collect(),
                };
                self.render_roster(&competitors)
            }
        }
    }

    fn render_day(&self, summary: &MarketSummary) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(summary)?);
        }

        let mut out = format!(
            "{:<28} {:>10} {:>6} {:>8} {:>6} {:>7}\n",
            "Competitor", "Rate", "Avail", "Dist km", "Rating", "Trend"
        );
        for c in &summary.competitors {
            out.push_str(&format!(
                "{:<28} {:>10} {:>5}% {:>8.1} {:>6.1} {:>7}\n",
                c.name,
                c.rate,
                c.availability,
                c.distance,
                c.rating,
                c.trend
            ));
        }
        out.push_str(&format!(
            "average {} | low {} | high {} | advantage {}% | share {}%\n",
            summary.average_rate,
            summary.lowest_rate,
            summary.highest_rate,
            summary.price_advantage,
            summary.market_share
        ));
        Ok(out)
    }

    fn render_range(&self, nights: &[DailyMarketSummary]) -> Result<String> {
        let overview = RangeOverview::from_days(nights);

        if self.format == OutputFormat::Json {
            let value = serde_json::json!({ "nights": nights, "overview": overview });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let mut out = format!(
            "{:<12} {:>5} {:>3} {:>10} {:>10} {:>10} {:>6}\n",
            "Date", "Index", "WE", "Average", "Low", "High", "Adv%"
        );
        for night in nights {
            out.push_str(&format!(
                "{:<12} {:>5} {:>3} {:>10} {:>10} {:>10} {:>6}\n",
                night.date,
                night.date_index,
                if night.is_weekend { "*" } else { "" },
                night.summary.average_rate,
                night.summary.lowest_rate,
                night.summary.highest_rate,
                night.summary.price_advantage
            ));
        }
        if let Some(overview) = overview {
            out.push_str(&format!(
                "{} nights ({} weekend) | low {} | high {} | mean {}\n",
                overview.nights,
                overview.weekend_nights,
                overview.lowest_rate,
                overview.highest_rate,
                overview.average_rate
            ));
        }
        Ok(out)
    }

    fn render_roster(&self, competitors: &[&CompetitorIdentity]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(competitors)?);
        }

        let mut out = String::new();
        for c in competitors {
            out.push_str(&format!(
                "{:<6} {:<28} {:<20} {}\n",
                c.id, c.name, c.category, c.distance
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(format: OutputFormat) -> CliHandler {
        let roster = CompetitorRoster::from_json(
            r#"{"competitors": [
                {"id": "1", "name": "Alpha", "type": "Luxury Resort", "distance": "3.5 km"},
                {"id": "2", "name": "Bravo Inn", "type": "City", "distance": "1.1 km"}
            ]}"#,
        )
        .unwrap();
        CliHandler::new(SynthesizerConfig::default(), roster, format)
    }

    #[test]
    fn test_parse_day_command() {
        let cli = Cli::parse_from([
            "rate-synth", "--format", "json", "day", "--date-index", "-2", "--weekend", "--ids",
            "1,2",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Day {
                date_index,
                weekend,
                ids,
            } => {
                assert_eq!(date_index, -2);
                assert!(weekend);
                assert_eq!(ids, vec!["1", "2"]);
            }
            other => panic!("Expected Day command, got {other:?}"),
        }
    }

    #[test]
    fn test_day_json_output() {
        let out = handler(OutputFormat::Json)
            .handle_command(Commands::Day {
                date_index: 1,
                weekend: true,
                ids: vec!["1".into()],
            })
            .unwrap();
        let summary: MarketSummary = serde_json::from_str(&out).unwrap();
        assert_eq!(summary.competitors[0].rate, 9800);
    }

    #[test]
    fn test_day_without_ids_uses_fallback() {
        let out = handler(OutputFormat::Table)
            .handle_command(Commands::Day {
                date_index: 0,
                weekend: false,
                ids: vec![],
            })
            .unwrap();
        assert!(out.contains("Grand Plaza Hotel"));
        assert!(out.contains("City Center Inn"));
        assert!(out.contains("average 9150"));
        assert!(out.contains("     up\n"));
        assert!(out.contains("   down\n"));
        assert!(!out.contains("Up"));
    }

    #[test]
    fn test_range_table_output() {
        let out = handler(OutputFormat::Table)
            .handle_command(Commands::Range {
                start: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
                days: Some(3),
                ids: vec!["1".into(), "2".into()],
            })
            .unwrap();
        assert!(out.contains("2026-10-17"));
        assert!(out.contains("3 nights (2 weekend)"));
    }

    #[test]
    fn test_range_rejects_zero_days() {
        let result = handler(OutputFormat::Table).handle_command(Commands::Range {
            start: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            days: Some(0),
            ids: vec![],
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_roster_query() {
        let out = handler(OutputFormat::Table)
            .handle_command(Commands::Roster {
                query: Some("bravo".into()),
            })
            .unwrap();
        assert!(out.contains("Bravo Inn"));
        assert!(!out.contains("Alpha"));
    }

    #[test]
    fn test_cli_overrides_are_validated() {
        let cli = Cli::parse_from(["rate-synth", "--base-rate", "inf", "roster"]);
        let mut config = SynthesizerConfig::default();
        let result = cli.apply_overrides(&mut config);
        assert!(matches!(result, Err(SynthError::Config(_))));

        let cli = Cli::parse_from(["rate-synth", "--base-rate", "NaN", "roster"]);
        let result = cli.apply_overrides(&mut SynthesizerConfig::default());
        assert!(matches!(result, Err(SynthError::Config(_))));
    }

    #[test]
    fn test_cli_overrides_replace_config() {
        let cli = Cli::parse_from([
            "rate-synth",
            "--roster",
            "other.json",
            "--base-rate",
            "12500",
            "roster",
        ]);
        let mut config = SynthesizerConfig::default();
        cli.apply_overrides(&mut config).unwrap();
        assert_eq!(config.synthesis.base_rate, 12500.0);
        assert_eq!(config.roster.path, PathBuf::from("other.json"));
    }
}
