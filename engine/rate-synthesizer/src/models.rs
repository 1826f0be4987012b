use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Distance from the subject property, in kilometres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    km: f64,
}

impl Distance {
    /// Distance used when the roster entry has no usable value
    pub const DEFAULT_KM: f64 = 1.0;

    pub fn from_km(km: f64) -> Self {
        Self { km }
    }

    pub fn km(&self) -> f64 {
        self.km
    }

    /// Parse a label such as `"2.1 km"`, falling back to the default on failure
    pub fn parse_lossy(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl Default for Distance {
    fn default() -> Self {
        Self {
            km: Self::DEFAULT_KM,
        }
    }
}

impl FromStr for Distance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix("km").unwrap_or(trimmed).trim_end();

        // Leading numeric portion only: "3.5km away" still yields 3.5
        let mut end = 0;
        let mut seen_digit = false;
        let mut seen_dot = false;
        for (idx, ch) in number.char_indices() {
            match ch {
                '+' | '-' if idx == 0 => {}
                '0'..='9' => seen_digit = true,
                '.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            end = idx + ch.len_utf8();
        }

        if !seen_digit {
            return Err(format!("no numeric distance in '{s}'"));
        }

        number[..end]
            .parse::<f64>()
            .map(Self::from_km)
            .map_err(|e| format!("invalid distance '{s}': {e}"))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km", self.km)
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.km)
    }
}

struct DistanceVisitor;

impl<'de> Visitor<'de> for DistanceVisitor {
    type Value = Distance;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a distance label like \"2.1 km\" or a number of kilometres")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Distance, E> {
        Ok(Distance::parse_lossy(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Distance, E> {
        Ok(Distance::from_km(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Distance, E> {
        Ok(Distance::from_km(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Distance, E> {
        Ok(Distance::from_km(v as f64))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Distance, E> {
        Ok(Distance::default())
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DistanceVisitor)
    }
}

/// A competing property selected by the user for comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorIdentity {
    pub id: String,

    pub name: String,

    /// Free-text category label (e.g. "Luxury Resort", "Business Hotel")
    #[serde(rename = "type", default)]
    pub category: String,

    #[serde(default)]
    pub distance: Distance,

    #[serde(default)]
    pub avatar: String,
}

impl CompetitorIdentity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        distance: Distance,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            distance,
            avatar: String::new(),
        }
    }
}

/// Direction a competitor's rate is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        };
        f.pad(label)
    }
}

/// Where the subject property sits relative to the market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketPosition {
    Competitive,
}

/// Rating band derived from a competitor's category label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateCategory {
    LuxuryResort,
    BusinessCity,
    BoutiqueHistoric,
    Standard,
}

impl RateCategory {
    /// Checked in order; the first band with a matching keyword wins
    const KEYWORDS: [(RateCategory, [&'static str; 2]); 3] = [
        (RateCategory::LuxuryResort, ["Luxury", "Resort"]),
        (RateCategory::BusinessCity, ["Business", "City"]),
        (RateCategory::BoutiqueHistoric, ["Boutique", "Historic"]),
    ];

    /// Classify a free-text label (case-sensitive substring match)
    pub fn classify(label: &str) -> Self {
        Self::KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| label.contains(w)))
            .map(|(category, _)| *category)
            .unwrap_or(RateCategory::Standard)
    }

    /// Guest rating before the per-position increment
    pub fn base_rating(&self) -> f64 {
        match self {
            RateCategory::LuxuryResort => 4.3,
            RateCategory::BusinessCity => 3.8,
            RateCategory::BoutiqueHistoric => 4.0,
            RateCategory::Standard => 3.9,
        }
    }
}

/// Synthesized rate snapshot for one competitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRateSample {
    pub name: String,
    pub rate: i64,
    pub availability: i64,
    pub distance: f64,
    pub rating: f64,
    pub trend: Trend,
}

/// Aggregate view over all synthesized competitor rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub competitors: Vec<CompetitorRateSample>,
    pub market_position: MarketPosition,
    pub average_rate: i64,
    pub lowest_rate: i64,
    pub highest_rate: i64,
    /// Percentage by which the base rate undercuts (+) or exceeds (-) the average
    pub price_advantage: i64,
    pub market_share: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_parsing() {
        assert_eq!(Distance::parse_lossy("2.1 km").km(), 2.1);
        assert_eq!(Distance::parse_lossy("3.5km").km(), 3.5);
        assert_eq!(Distance::parse_lossy("0.8").km(), 0.8);
        assert_eq!(Distance::parse_lossy(" 12 km ").km(), 12.0);
        assert_eq!(Distance::parse_lossy("4.2 km away").km(), 4.2);
    }

    #[test]
    fn test_distance_defaults_on_garbage() {
        assert_eq!(Distance::parse_lossy("").km(), 1.0);
        assert_eq!(Distance::parse_lossy("km").km(), 1.0);
        assert_eq!(Distance::parse_lossy("near the station").km(), 1.0);
        assert_eq!(Distance::parse_lossy("-").km(), 1.0);
        assert!("abc".parse::<Distance>().is_err());
    }

    #[test]
    fn test_identity_deserialization() {
        let json = r#"{
            "id": "1",
            "name": "Alpha",
            "type": "Luxury Resort",
            "distance": "3.5 km",
            "avatar": "A"
        }"#;
        let identity: CompetitorIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.category, "Luxury Resort");
        assert_eq!(identity.distance.km(), 3.5);

        let json = r#"{"id":"2","name":"Beta","type":"City Hotel","distance":2}"#;
        let identity: CompetitorIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.distance.km(), 2.0);
        assert_eq!(identity.avatar, "");

        let json = r#"{"id":"3","name":"Gamma","distance":"unknown"}"#;
        let identity: CompetitorIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.distance.km(), 1.0);
        assert_eq!(identity.category, "");

        let json = r#"{"id":"4","name":"Delta","distance":null}"#;
        let identity: CompetitorIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.distance.km(), 1.0);
    }

    #[test]
    fn test_category_precedence() {
        assert_eq!(
            RateCategory::classify("Luxury Business Hotel"),
            RateCategory::LuxuryResort
        );
        assert_eq!(
            RateCategory::classify("City Boutique"),
            RateCategory::BusinessCity
        );
        assert_eq!(
            RateCategory::classify("Historic Inn"),
            RateCategory::BoutiqueHistoric
        );
        assert_eq!(RateCategory::classify("Hostel"), RateCategory::Standard);
        assert_eq!(
            RateCategory::classify("luxury resort"),
            RateCategory::Standard
        );
    }

    #[test]
    fn test_trend_display_matches_json() {
        for trend in [Trend::Up, Trend::Down, Trend::Stable] {
            let json = serde_json::to_value(trend).unwrap();
            assert_eq!(json, trend.to_string());
        }
        assert_eq!(format!("{:>7}", Trend::Down), "   down");
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = MarketSummary {
            competitors: vec![],
            market_position: MarketPosition::Competitive,
            average_rate: 1,
            lowest_rate: 1,
            highest_rate: 1,
            price_advantage: 0,
            market_share: 23,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["marketPosition"], "competitive");
        assert_eq!(value["averageRate"], 1);
        assert_eq!(value["marketShare"], 23);
    }
}
