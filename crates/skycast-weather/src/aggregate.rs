//! Daily forecast aggregation.
//!
//! Reduces a flat series of forecast samples (typically 3-hourly, ~40 points)
//! into at most five per-day summaries. Days are UTC calendar days, and the
//! near-noon window used to pick the icon is measured in UTC as well.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::Timelike;

use crate::format::format_day_label;
use crate::types::{DailySummary, DateKey, ForecastSample};
use crate::units::round_half_up;

/// The provider's free tier covers five days
pub const MAX_FORECAST_DAYS: usize = 5;

/// UTC hours that count as "around noon" for the day's icon
pub const NOON_HOURS: RangeInclusive<u32> = 11..=13;

/// Group `samples` by UTC day and summarize each day.
///
/// Input order does not affect which day a sample lands in or the min/max
/// temperatures. It does decide ties: the dominant condition is the
/// earliest-seen label among equally frequent ones, and the icon comes from
/// the first near-noon sample (or the first sample) of the day.
pub fn aggregate(samples: &[ForecastSample]) -> Vec<DailySummary> {
    let mut buckets: BTreeMap<DateKey, Vec<ForecastSample>> = BTreeMap::new();
    for sample in samples {
        buckets
            .entry(sample.date_key())
            .or_default()
            .push(sample.clone());
    }

    let summaries: Vec<DailySummary> = buckets
        .into_iter()
        .filter_map(|(date, day)| summarize_day(date, day))
        .take(MAX_FORECAST_DAYS)
        .collect();

    tracing::debug!(
        "Aggregated {} samples into {} days",
        samples.len(),
        summaries.len()
    );
    summaries
}

fn summarize_day(date: DateKey, samples: Vec<ForecastSample>) -> Option<DailySummary> {
    let first = samples.first()?;

    let (min, max) = samples.iter().fold(
        (first.temperature(), first.temperature()),
        |(min, max), s| (min.min(s.temperature()), max.max(s.temperature())),
    );

    let condition = dominant_condition(&samples)?.to_string();

    let icon = samples
        .iter()
        .find(|s| NOON_HOURS.contains(&s.time().hour()))
        .unwrap_or(first)
        .icon()
        .to_string();

    Some(DailySummary {
        label: format_day_label(date),
        date,
        min_temp: round_half_up(min),
        max_temp: round_half_up(max),
        condition,
        icon,
        samples,
    })
}

/// Most frequent condition label; ties go to the label seen first.
fn dominant_condition(samples: &[ForecastSample]) -> Option<&str> {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for sample in samples {
        match tally.iter_mut().find(|(label, _)| *label == sample.condition()) {
            Some((_, count)) => *count += 1,
            None => tally.push((sample.condition(), 1)),
        }
    }

    tally
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (label, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((label, count)),
        })
        .map(|(label, _)| label)
}
