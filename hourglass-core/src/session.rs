//! Deep-work session detection: maximal runs of consecutive productive hours
//! within a single day.

use crate::entry::HourEntry;
use crate::tags::TagCategories;

/// Scans one day's 24 slots and returns the length of each run of consecutive
/// productive hours.
///
/// The streak counter starts at zero for every call, so sessions never carry
/// over a midnight boundary: hour 23 of one day and hour 0 of the next are
/// two one-hour sessions, not one two-hour session.
pub fn detect_sessions(day: &[HourEntry; 24], categories: &TagCategories) -> Vec<u32> {
    let mut sessions = Vec::new();
    let mut streak = 0u32;
    for entry in day {
        if categories.is_productive_entry(entry) {
            streak += 1;
        } else if streak > 0 {
            sessions.push(streak);
            streak = 0;
        }
    }
    if streak > 0 {
        sessions.push(streak);
    }
    sessions
}
