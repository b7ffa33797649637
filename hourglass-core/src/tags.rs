//! Tag classification: which tags count as productive output, which as
//! recovery, and which as everything else.
//!
//! The mapping is injected configuration, not a hard-coded vocabulary, so the
//! engine works unchanged with any tag set a user invents.

use crate::entry::HourEntry;
use std::collections::HashMap;

/// Tags the engine treats as productive when nothing else is configured.
pub const DEFAULT_PRODUCTIVE: &[&str] = &["Work", "Study"];
/// Tags the engine treats as recovery when nothing else is configured.
pub const DEFAULT_RECOVERY: &[&str] = &["Rest", "Exercise"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    Productive,
    Recovery,
    Other,
}

/// The tag → category lookup table.
///
/// Unknown tags fall through to [`TagCategory::Other`]; the table only stores
/// the productive and recovery vocabularies.
#[derive(Debug, Clone)]
pub struct TagCategories {
    table: HashMap<String, TagCategory>,
}

impl Default for TagCategories {
    fn default() -> Self {
        Self::with_sets(DEFAULT_PRODUCTIVE, DEFAULT_RECOVERY)
    }
}

impl TagCategories {
    /// Builds a table from explicit productive and recovery tag sets.
    ///
    /// A tag named in both sets resolves to productive; the productive set is
    /// inserted last and wins.
    pub fn with_sets<P, R>(productive: P, recovery: R) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let mut table = HashMap::new();
        for tag in recovery {
            table.insert(tag.as_ref().to_string(), TagCategory::Recovery);
        }
        for tag in productive {
            table.insert(tag.as_ref().to_string(), TagCategory::Productive);
        }
        Self { table }
    }

    pub fn category_of(&self, tag: &str) -> TagCategory {
        self.table.get(tag).copied().unwrap_or(TagCategory::Other)
    }

    pub fn is_productive(&self, tag: &str) -> bool {
        self.category_of(tag) == TagCategory::Productive
    }

    /// A recorded hour with at least one productive tag counts toward
    /// deep-work sessions and the productive hour distribution.
    pub fn is_productive_entry(&self, entry: &HourEntry) -> bool {
        entry.is_recorded() && entry.tags.iter().any(|t| self.is_productive(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn defaults_classify_the_stock_vocabulary() {
        let cats = TagCategories::default();
        assert_eq!(cats.category_of("Work"), TagCategory::Productive);
        assert_eq!(cats.category_of("Study"), TagCategory::Productive);
        assert_eq!(cats.category_of("Rest"), TagCategory::Recovery);
        assert_eq!(cats.category_of("Exercise"), TagCategory::Recovery);
    }

    #[test]
    fn unknown_tags_are_other() {
        let cats = TagCategories::default();
        assert_eq!(cats.category_of("Chores"), TagCategory::Other);
        assert_eq!(cats.category_of(""), TagCategory::Other);
    }

    #[test]
    fn custom_sets_replace_the_defaults() {
        let cats = TagCategories::with_sets(["Deep"], ["Nap"]);
        assert_eq!(cats.category_of("Deep"), TagCategory::Productive);
        assert_eq!(cats.category_of("Nap"), TagCategory::Recovery);
        assert_eq!(cats.category_of("Work"), TagCategory::Other);
    }

    #[test]
    fn productive_wins_when_a_tag_is_in_both_sets() {
        let cats = TagCategories::with_sets(["Gym"], ["Gym"]);
        assert_eq!(cats.category_of("Gym"), TagCategory::Productive);
    }

    #[test]
    fn productive_entry_requires_content_and_a_productive_tag() {
        let cats = TagCategories::default();
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let recorded = HourEntry::new(d, 9, "Coding", &["Work"]);
        assert!(cats.is_productive_entry(&recorded));

        let tagged_but_empty = HourEntry {
            content: String::new(),
            ..recorded.clone()
        };
        assert!(!cats.is_productive_entry(&tagged_but_empty));

        let recorded_but_restful = HourEntry::new(d, 9, "Nap", &["Rest"]);
        assert!(!cats.is_productive_entry(&recorded_but_restful));
    }
}
