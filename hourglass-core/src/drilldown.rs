//! Drill-down: the reverse query from an aggregate data point back to the
//! source records that produced it.

use crate::entry::HourEntry;
use crate::journal::Journal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What the user clicked on: a pie slice, a trend bar, or an hour band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DrillDownFilter {
    Tag(String),
    Date(NaiveDate),
    Hour(u8),
}

/// One matched source record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrillDownRecord {
    pub date: NaiveDate,
    pub entry: HourEntry,
}

/// Collects the recorded entries within `target_dates` that match `filter`,
/// sorted date descending, hour ascending within a date.
///
/// Only recorded entries match; an empty result is a valid answer.
pub fn drill_down(
    journal: &Journal,
    target_dates: &[NaiveDate],
    filter: &DrillDownFilter,
) -> Vec<DrillDownRecord> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for &date in target_dates {
        if !seen.insert(date) {
            continue;
        }
        for entry in journal.day(date).iter() {
            if !entry.is_recorded() {
                continue;
            }
            let matched = match filter {
                DrillDownFilter::Tag(tag) => entry.tags.iter().any(|t| t == tag),
                DrillDownFilter::Date(d) => date == *d,
                DrillDownFilter::Hour(h) => entry.hour == *h,
            };
            if matched {
                records.push(DrillDownRecord {
                    date,
                    entry: entry.clone(),
                });
            }
        }
    }
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.entry.hour.cmp(&b.entry.hour))
    });
    records
}
