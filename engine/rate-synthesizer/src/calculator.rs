use crate::models::*;
use tracing::debug;

/// Rate multipliers applied to the base rate, cycled by competitor position
pub const RATE_MULTIPLIERS: [f64; 8] = [0.92, 0.88, 1.05, 1.15, 1.25, 0.95, 1.08, 1.12];

/// Trend assigned by `(date_index + position) mod 3`
pub const TREND_CYCLE: [Trend; 3] = [Trend::Up, Trend::Down, Trend::Stable];

/// Main-branch availability bounds (percent)
pub const MIN_AVAILABILITY: i64 = 10;
pub const MAX_AVAILABILITY: i64 = 95;

const BASE_AVAILABILITY: i64 = 45;
const AVAILABILITY_STEP_PER_POSITION: i64 = 8;

/// Per-day rate increment for the first competitor, grown by `DAILY_STEP_PER_POSITION`
const DAILY_INCREMENT: i64 = 100;
const DAILY_STEP_PER_POSITION: i64 = 20;

/// Weekend surcharge for the first competitor, grown by `WEEKEND_STEP_PER_POSITION`
const WEEKEND_SURCHARGE: i64 = 500;
const WEEKEND_STEP_PER_POSITION: i64 = 100;

const RATING_STEP_PER_POSITION: f64 = 0.1;

const MARKET_SHARE_BASE: i64 = 23;

/// Hardcoded archetype used when the caller has not selected any competitor
struct FallbackCompetitor {
    name: &'static str,
    multiplier: f64,
    daily_increment: i64,
    availability_base: i64,
    availability_period: i64,
    distance_km: f64,
    rating: f64,
}

const FALLBACK_COMPETITORS: [FallbackCompetitor; 2] = [
    FallbackCompetitor {
        name: "Grand Plaza Hotel",
        multiplier: 0.95,
        daily_increment: 140,
        availability_base: 65,
        availability_period: 20,
        distance_km: 0.8,
        rating: 4.2,
    },
    FallbackCompetitor {
        name: "City Center Inn",
        multiplier: 0.88,
        daily_increment: 130,
        availability_base: 78,
        availability_period: 15,
        distance_km: 1.2,
        rating: 3.9,
    },
];

/// Round half up, matching the dashboard's `Math.round`
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounded float to integer currency units; saturates, NaN becomes 0
fn to_units(value: f64) -> i64 {
    round_half_up(value) as i64
}

/// Synthesize competitor rates and market statistics for one calendar day.
///
/// An empty `selected` slice produces the two fallback archetypes. The
/// computation is pure: identical arguments always give identical output.
pub fn synthesize(
    selected: &[CompetitorIdentity],
    base_rate: f64,
    date_index: i64,
    is_weekend: bool,
) -> MarketSummary {
    if selected.is_empty() {
        return synthesize_fallback(base_rate, date_index);
    }

    let competitors: Vec<CompetitorRateSample> = selected
        .iter()
        .enumerate()
        .map(|(position, identity)| {
            sample_competitor(identity, position, base_rate, date_index, is_weekend)
        })
        .collect();

    let rates: Vec<i64> = competitors.iter().map(|c| c.rate).collect();
    let average_rate = average(&rates);
    let price_advantage = if average_rate == 0 {
        0
    } else {
        price_advantage(base_rate, average_rate)
    };

    debug!(
        "Synthesized {} competitor rates (date_index: {}, weekend: {}, average: {})",
        competitors.len(),
        date_index,
        is_weekend,
        average_rate
    );

    MarketSummary {
        competitors,
        market_position: MarketPosition::Competitive,
        average_rate,
        lowest_rate: rates.iter().copied().min().unwrap_or(0),
        highest_rate: rates.iter().copied().max().unwrap_or(0),
        price_advantage,
        market_share: market_share(date_index),
    }
}

/// Rate sample for the competitor at `position` in the caller's selection
fn sample_competitor(
    identity: &CompetitorIdentity,
    position: usize,
    base_rate: f64,
    date_index: i64,
    is_weekend: bool,
) -> CompetitorRateSample {
    let i = position as i64;
    let multiplier = RATE_MULTIPLIERS[position % RATE_MULTIPLIERS.len()];

    let daily_step = DAILY_INCREMENT.saturating_add(i.saturating_mul(DAILY_STEP_PER_POSITION));
    let daily = date_index.saturating_mul(daily_step);
    let weekend = if is_weekend {
        WEEKEND_SURCHARGE.saturating_add(i.saturating_mul(WEEKEND_STEP_PER_POSITION))
    } else {
        0
    };
    let rate = to_units(base_rate * multiplier)
        .saturating_add(daily)
        .saturating_add(weekend);

    let availability = BASE_AVAILABILITY
        .saturating_add(date_index % 30)
        .saturating_add(i.saturating_mul(AVAILABILITY_STEP_PER_POSITION))
        .clamp(MIN_AVAILABILITY, MAX_AVAILABILITY);

    let category = RateCategory::classify(&identity.category);
    let raw_rating = category.base_rating() + position as f64 * RATING_STEP_PER_POSITION;
    let rating = round_half_up(raw_rating * 10.0) / 10.0;

    let trend_slot = date_index.rem_euclid(3).saturating_add(i % 3) % 3;

    CompetitorRateSample {
        name: identity.name.clone(),
        rate,
        availability,
        distance: identity.distance.km(),
        rating,
        trend: TREND_CYCLE[trend_slot as usize],
    }
}

/// Two hardcoded archetypes; availability is not clamped and the price
/// advantage is not guarded against a zero average.
fn synthesize_fallback(base_rate: f64, date_index: i64) -> MarketSummary {
    let competitors: Vec<CompetitorRateSample> = FALLBACK_COMPETITORS
        .iter()
        .enumerate()
        .map(|(slot, archetype)| {
            let trend = match slot {
                0 if date_index % 3 == 0 => Trend::Up,
                0 => Trend::Stable,
                _ => Trend::Down,
            };
            CompetitorRateSample {
                name: archetype.name.to_string(),
                rate: to_units(base_rate * archetype.multiplier)
                    .saturating_add(date_index.saturating_mul(archetype.daily_increment)),
                availability: archetype.availability_base
                    + date_index % archetype.availability_period,
                distance: archetype.distance_km,
                rating: archetype.rating,
                trend,
            }
        })
        .collect();

    let rates: Vec<i64> = competitors.iter().map(|c| c.rate).collect();
    let average_rate = average(&rates);

    debug!(
        "No competitors selected, using fallback archetypes (date_index: {}, average: {})",
        date_index, average_rate
    );

    MarketSummary {
        competitors,
        market_position: MarketPosition::Competitive,
        average_rate,
        lowest_rate: rates.iter().copied().min().unwrap_or(0),
        highest_rate: rates.iter().copied().max().unwrap_or(0),
        price_advantage: price_advantage(base_rate, average_rate),
        market_share: market_share(date_index),
    }
}

fn average(rates: &[i64]) -> i64 {
    mean_half_up(rates.iter().copied())
}

/// Integer mean rounded half up; exact for every `i64` input
pub(crate) fn mean_half_up<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0i128, 0i128), |(sum, count), v| (sum + i128::from(v), count + 1));
    if count == 0 {
        return 0;
    }
    // floor(sum / count + 1/2)
    let mean = (2 * sum + count).div_euclid(2 * count);
    mean.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Unguarded: a zero average yields a non-finite ratio, which saturates
fn price_advantage(base_rate: f64, average_rate: i64) -> i64 {
    let average = average_rate as f64;
    to_units((base_rate - average) / average * 100.0)
}

fn market_share(date_index: i64) -> i64 {
    MARKET_SHARE_BASE + date_index % 8
}
