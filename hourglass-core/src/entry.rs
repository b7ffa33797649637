use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One hourly slot of the journal: what happened during `hour` on `date`.
///
/// A slot with empty `content` is an unrecorded hour; it still exists in the
/// day so that the 24-slot invariant holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourEntry {
    pub date: NaiveDate,
    pub hour: u8,
    pub content: String,
    pub tags: Vec<String>,
}

impl HourEntry {
    pub fn new(date: NaiveDate, hour: u8, content: &str, tags: &[&str]) -> Self {
        Self {
            date,
            hour,
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// An unrecorded slot for the given date and hour.
    pub fn empty(date: NaiveDate, hour: u8) -> Self {
        Self {
            date,
            hour,
            content: String::new(),
            tags: Vec::new(),
        }
    }

    /// Whether anything was written down for this hour.
    pub fn is_recorded(&self) -> bool {
        !self.content.is_empty()
    }
}
