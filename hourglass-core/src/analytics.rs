//! The aggregation pass: one walk over the selected dates producing every
//! derived view at once.
//!
//! `aggregate` is a pure function of `(journal, target_dates, categories)`.
//! It never mutates its inputs and never fails: absent days are empty days,
//! unknown tags are `Other`, and every ratio degrades to 0 instead of
//! dividing by zero. Callers that want caching can memoize on the inputs.

use crate::journal::{HOURS_PER_DAY, Journal};
use crate::session::detect_sessions;
use crate::tags::{TagCategories, TagCategory};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Number of golden hours reported: strictly the top 3.
const GOLDEN_HOUR_LIMIT: usize = 3;

/// Cross-range occurrence count for one tag (the category pie).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u32,
}

/// Recorded-entry count for one date (the daily trend bars).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Average recorded entries for one weekday, Monday-first (0 = Monday).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayLoad {
    pub weekday: u8,
    pub avg_count: f64,
    pub is_weekend: bool,
}

/// One of the top hours-of-day by productive entry count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoldenHour {
    pub hour: u8,
    pub count: u32,
}

/// Tag occurrences bucketed by category.
///
/// Tags are tallied independently: an entry carrying both a productive and a
/// recovery tag increments both buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnergyBalance {
    pub production: u32,
    pub recovery: u32,
    pub other: u32,
}

/// Every derived view of the journal for one resolved date range.
///
/// Entirely recomputed from the inputs on each call; nothing here has an
/// independent lifecycle. Field names serialize to the wire shape consumed
/// by chart renderers (`pieData`, `dailyTrend`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    /// Tag counts, highest first, ties by tag name.
    pub pie_data: Vec<TagCount>,
    /// Recorded entries per target date, chronological.
    pub daily_trend: Vec<DayCount>,
    /// Average load per weekday, Monday through Sunday.
    pub weekday_data: Vec<WeekdayLoad>,
    /// Recorded entries per hour of day, all tags.
    pub hour_dist_all: [u32; HOURS_PER_DAY],
    /// Top productive hours, at most three.
    pub golden_hours: Vec<GoldenHour>,
    /// Lengths of all deep-work sessions across the range, in hours.
    pub deep_work_sessions: Vec<u32>,
    pub energy_balance: EnergyBalance,
    pub total_records: u32,
    pub period_days: u32,
    /// Share of productive tag occurrences among all tag occurrences, 0..=100.
    pub productivity_ratio: f64,
}

impl AggregationResult {
    /// The all-zero result an empty range produces.
    fn zeroed() -> Self {
        Self {
            pie_data: Vec::new(),
            daily_trend: Vec::new(),
            weekday_data: (0..7)
                .map(|w| WeekdayLoad {
                    weekday: w,
                    avg_count: 0.0,
                    is_weekend: w >= 5,
                })
                .collect(),
            hour_dist_all: [0; HOURS_PER_DAY],
            golden_hours: Vec::new(),
            deep_work_sessions: Vec::new(),
            energy_balance: EnergyBalance::default(),
            total_records: 0,
            period_days: 0,
            productivity_ratio: 0.0,
        }
    }
}

/// Runs the full aggregation pass over `target_dates`.
///
/// Dates are visited in the given order; duplicates are skipped so that no
/// day is counted twice. `daily_trend` comes back chronological regardless of
/// the (usually descending) input order.
pub fn aggregate(
    journal: &Journal,
    target_dates: &[NaiveDate],
    categories: &TagCategories,
) -> AggregationResult {
    let mut result = AggregationResult::zeroed();

    let mut tag_counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut hour_dist_productive = [0u32; HOURS_PER_DAY];
    let mut weekday_counts = [0u32; 7];
    let mut weekday_days = [0u32; 7];

    let mut seen = HashSet::new();
    for &date in target_dates {
        if !seen.insert(date) {
            continue;
        }
        let day = journal.day(date);
        let weekday = date.weekday().num_days_from_monday() as usize;
        weekday_days[weekday] += 1;

        let mut day_count = 0u32;
        for entry in day.iter() {
            if !entry.is_recorded() {
                continue;
            }
            day_count += 1;
            result.hour_dist_all[entry.hour as usize] += 1;
            weekday_counts[weekday] += 1;

            let mut productive_hour = false;
            for tag in &entry.tags {
                *tag_counts.entry(tag.clone()).or_default() += 1;
                match categories.category_of(tag) {
                    TagCategory::Productive => {
                        result.energy_balance.production += 1;
                        productive_hour = true;
                    }
                    TagCategory::Recovery => result.energy_balance.recovery += 1,
                    TagCategory::Other => result.energy_balance.other += 1,
                }
            }
            if productive_hour {
                hour_dist_productive[entry.hour as usize] += 1;
            }
        }

        result.daily_trend.push(DayCount {
            date,
            count: day_count,
        });
        result
            .deep_work_sessions
            .extend(detect_sessions(day.as_ref(), categories));
    }

    // Input order is most-recent-first; the trend reads oldest-first.
    result.daily_trend.reverse();

    result.golden_hours = golden_hours(&hour_dist_productive);
    for w in 0..7 {
        result.weekday_data[w].avg_count = round1(average(weekday_counts[w], weekday_days[w]));
    }

    let productive_total: u32 = tag_counts
        .iter()
        .filter(|(tag, _)| categories.is_productive(tag))
        .map(|(_, count)| count)
        .sum();
    let tag_total: u32 = tag_counts.values().sum();
    result.productivity_ratio = 100.0 * average(productive_total, tag_total);

    result.pie_data = tag_counts
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect();
    result
        .pie_data
        .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));

    result.total_records = result.daily_trend.iter().map(|d| d.count).sum();
    result.period_days = seen.len() as u32;

    result
}

/// Top productive hours: count descending, hour ascending on ties, top 3,
/// zero-count hours excluded.
fn golden_hours(hour_dist_productive: &[u32; HOURS_PER_DAY]) -> Vec<GoldenHour> {
    let mut hours: Vec<GoldenHour> = hour_dist_productive
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(hour, &count)| GoldenHour {
            hour: hour as u8,
            count,
        })
        .collect();
    hours.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.hour.cmp(&b.hour)));
    hours.truncate(GOLDEN_HOUR_LIMIT);
    hours
}

/// `num / den` as f64, or 0 when the denominator is 0.
fn average(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        f64::from(num) / f64::from(den)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
