//! Period selection: turns a user-chosen time window into the ordered list of
//! dates the analytics pass should visit.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use strum_macros::EnumString;

/// The caller-chosen analysis window.
///
/// `Custom` bounds travel separately (see [`resolve_dates`]); the variant only
/// selects the filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Period {
    Today,
    #[strum(serialize = "last-7-days", serialize = "7d")]
    Last7Days,
    #[strum(serialize = "last-30-days", serialize = "30d")]
    Last30Days,
    All,
    Custom,
}

/// Resolves a period into target dates, most recent first.
///
/// `today` is always part of the candidate set even when the journal has no
/// entries for it yet, so `Today` never comes back empty. `NaiveDate` ordering
/// matches lexicographic ISO-date ordering, so no string handling is needed.
///
/// A custom range with `start > end` resolves to an empty list, not an error.
pub fn resolve_dates(
    period: Period,
    custom: Option<(NaiveDate, NaiveDate)>,
    today: NaiveDate,
    known_dates: &[NaiveDate],
) -> Vec<NaiveDate> {
    let mut candidates: BTreeSet<NaiveDate> = known_dates.iter().copied().collect();
    candidates.insert(today);
    let descending = candidates.into_iter().rev();

    match period {
        Period::Today => vec![today],
        Period::Last7Days => descending.take(7).collect(),
        Period::Last30Days => descending.take(30).collect(),
        Period::All => descending.collect(),
        Period::Custom => match custom {
            Some((start, end)) => descending.filter(|d| *d >= start && *d <= end).collect(),
            None => Vec::new(),
        },
    }
}
