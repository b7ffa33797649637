//! The read-only journal snapshot the analytics engine consumes.
//!
//! A journal maps each date to exactly 24 hourly slots. The 24-slot shape and
//! the `entry[i].hour == i` invariant are enforced here, at the boundary,
//! because hour-indexed accumulation downstream silently corrupts if they do
//! not hold. A date that is absent from the snapshot is a valid, fully empty
//! day — never an error.

use crate::entry::HourEntry;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Default)]
pub struct Journal {
    days: BTreeMap<NaiveDate, Box<[HourEntry; HOURS_PER_DAY]>>,
}

/// One slot as stored in the snapshot file: `{ "hour": 9, "content": "...",
/// "tags": [...] }`, keyed by date at the top level so the slot itself
/// carries no date.
#[derive(Debug, Deserialize)]
struct SnapshotSlot {
    hour: u8,
    #[serde(default)]
    content: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fully synthesized empty day for `date`.
    pub fn empty_day(date: NaiveDate) -> [HourEntry; HOURS_PER_DAY] {
        std::array::from_fn(|h| HourEntry::empty(date, h as u8))
    }

    /// Inserts one day's slots, validating the 24-slot shape.
    ///
    /// Rejects anything that would break hour-indexed accumulation: wrong
    /// slot count, a slot whose `hour` disagrees with its index, or a slot
    /// dated differently from the day key.
    pub fn insert_day(&mut self, date: NaiveDate, entries: Vec<HourEntry>) -> Result<()> {
        if entries.len() != HOURS_PER_DAY {
            bail!(
                "day {date} has {} slots, expected {HOURS_PER_DAY}",
                entries.len()
            );
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.hour as usize != i {
                bail!("day {date} slot {i} carries hour {}", entry.hour);
            }
            if entry.date != date {
                bail!("day {date} slot {i} is dated {}", entry.date);
            }
        }
        let day: Box<[HourEntry; HOURS_PER_DAY]> = entries
            .try_into()
            .map(Box::new)
            .expect("length checked above");
        self.days.insert(date, day);
        Ok(())
    }

    /// The 24 slots for `date`, synthesizing an empty day when absent.
    pub fn day(&self, date: NaiveDate) -> Cow<'_, [HourEntry; HOURS_PER_DAY]> {
        match self.days.get(&date) {
            Some(day) => Cow::Borrowed(day.as_ref()),
            None => Cow::Owned(Self::empty_day(date)),
        }
    }

    /// All dates present in the snapshot, ascending.
    pub fn known_dates(&self) -> Vec<NaiveDate> {
        self.days.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Parses the snapshot JSON written by the journal app:
    /// `{ "YYYY-MM-DD": [ { "hour": 0, "content": "", "tags": [] }, ... ] }`.
    ///
    /// Days may list fewer than 24 slots; unlisted hours are filled empty.
    /// Duplicate or out-of-range hours within a day are rejected.
    pub fn from_snapshot_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<SnapshotSlot>> =
            serde_json::from_str(json).context("parsing journal snapshot")?;

        let mut journal = Self::new();
        for (key, slots) in raw {
            let date = NaiveDate::parse_from_str(&key, "%Y-%m-%d")
                .with_context(|| format!("invalid date key '{key}' in snapshot"))?;

            let mut day = Self::empty_day(date);
            let mut filled = [false; HOURS_PER_DAY];
            for slot in slots {
                let hour = slot.hour as usize;
                if hour >= HOURS_PER_DAY {
                    bail!("day {date} has a slot with hour {}", slot.hour);
                }
                if filled[hour] {
                    bail!("day {date} lists hour {} twice", slot.hour);
                }
                filled[hour] = true;
                day[hour] = HourEntry {
                    date,
                    hour: slot.hour,
                    content: slot.content,
                    tags: slot.tags,
                };
            }
            journal.insert_day(date, day.to_vec())?;
        }
        Ok(journal)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Builds a journal with the given recorded hours, all other slots empty.
    pub(crate) fn mk_journal(recorded: &[(&str, u8, &str, &[&str])]) -> Journal {
        let mut days: BTreeMap<NaiveDate, Vec<(u8, String, Vec<String>)>> = BTreeMap::new();
        for (date, hour, content, tags) in recorded {
            days.entry(d(date)).or_default().push((
                *hour,
                content.to_string(),
                tags.iter().map(|t| t.to_string()).collect(),
            ));
        }

        let mut journal = Journal::new();
        for (date, slots) in days {
            let mut day = Journal::empty_day(date).to_vec();
            for (hour, content, tags) in slots {
                day[hour as usize] = HourEntry {
                    date,
                    hour,
                    content,
                    tags,
                };
            }
            journal.insert_day(date, day).unwrap();
        }
        journal
    }

    #[test]
    fn absent_date_synthesizes_an_empty_day() {
        let journal = Journal::new();
        let day = journal.day(d("2024-01-01"));
        assert_eq!(day.len(), HOURS_PER_DAY);
        for (i, entry) in day.iter().enumerate() {
            assert_eq!(entry.hour as usize, i);
            assert!(!entry.is_recorded());
        }
    }

    #[test]
    fn insert_day_rejects_wrong_slot_count() {
        let mut journal = Journal::new();
        let date = d("2024-01-01");
        let short = Journal::empty_day(date)[..23].to_vec();
        let err = journal.insert_day(date, short).unwrap_err();
        assert!(err.to_string().contains("23 slots"));
    }

    #[test]
    fn insert_day_rejects_misindexed_hour() {
        let mut journal = Journal::new();
        let date = d("2024-01-01");
        let mut day = Journal::empty_day(date).to_vec();
        day[5].hour = 6;
        let err = journal.insert_day(date, day).unwrap_err();
        assert!(err.to_string().contains("slot 5"));
    }

    #[test]
    fn insert_day_rejects_foreign_date() {
        let mut journal = Journal::new();
        let date = d("2024-01-01");
        let mut day = Journal::empty_day(date).to_vec();
        day[0].date = d("2024-01-02");
        assert!(journal.insert_day(date, day).is_err());
    }

    #[test]
    fn known_dates_are_ascending() {
        let journal = mk_journal(&[
            ("2024-02-01", 9, "b", &[]),
            ("2024-01-01", 9, "a", &[]),
        ]);
        assert_eq!(journal.known_dates(), vec![d("2024-01-01"), d("2024-02-01")]);
    }

    #[test]
    fn snapshot_parses_sparse_days() {
        let json = r#"{
            "2024-01-01": [
                { "hour": 9, "content": "Coding", "tags": ["Work"] },
                { "hour": 12, "content": "Lunch", "tags": ["Rest"] }
            ]
        }"#;
        let journal = Journal::from_snapshot_str(json).unwrap();
        let day = journal.day(d("2024-01-01"));
        assert_eq!(day[9].content, "Coding");
        assert_eq!(day[12].tags, vec!["Rest"]);
        assert!(!day[10].is_recorded());
    }

    #[test]
    fn snapshot_file_round_trips() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "2024-01-01": [ {{ "hour": 9, "content": "Coding", "tags": ["Work"] }} ],
                "2024-01-02": [ {{ "hour": 7, "content": "Reading", "tags": ["Study"] }} ]
            }}"#
        )
        .unwrap();

        let json = std::fs::read_to_string(file.path()).unwrap();
        let journal = Journal::from_snapshot_str(&json).unwrap();
        assert_eq!(journal.known_dates(), vec![d("2024-01-01"), d("2024-01-02")]);
        assert_eq!(journal.day(d("2024-01-01"))[9].content, "Coding");
        assert_eq!(journal.day(d("2024-01-02"))[7].tags, vec!["Study"]);
    }

    #[test]
    fn snapshot_rejects_duplicate_hours() {
        let json = r#"{
            "2024-01-01": [
                { "hour": 9, "content": "a", "tags": [] },
                { "hour": 9, "content": "b", "tags": [] }
            ]
        }"#;
        let err = Journal::from_snapshot_str(json).unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn snapshot_rejects_out_of_range_hours() {
        let json = r#"{ "2024-01-01": [ { "hour": 24, "content": "x", "tags": [] } ] }"#;
        assert!(Journal::from_snapshot_str(json).is_err());
    }

    #[test]
    fn snapshot_rejects_bad_date_keys() {
        let json = r#"{ "01/01/2024": [] }"#;
        let err = Journal::from_snapshot_str(json).unwrap_err();
        assert!(err.to_string().contains("invalid date key"));
    }
}
