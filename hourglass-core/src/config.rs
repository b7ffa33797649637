use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::tags::{DEFAULT_PRODUCTIVE, DEFAULT_RECOVERY, TagCategories};

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the journal snapshot JSON file.
    pub journal_file: PathBuf,
    /// Display format for dates in rendered reports.
    pub date_format: String,
    /// Tags counted as productive output (deep work, golden hours).
    pub productive_tags: Vec<String>,
    /// Tags counted as energy recovery.
    pub recovery_tags: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    journal_file: Option<PathBuf>,
    date_format: Option<String>,
    /// Optional table:
    /// [tags]
    /// productive = ["Work", "Study", "Writing"]
    /// recovery = ["Rest", "Exercise", "Walk"]
    tags: Option<FileTagSets>,
}

#[derive(Debug, Deserialize, Default)]
struct FileTagSets {
    productive: Option<Vec<String>>,
    recovery: Option<Vec<String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native)
    /// and apply defaults for anything missing.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_default();
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let tags = file_config.tags.unwrap_or_default();
        Self {
            journal_file: file_config
                .journal_file
                .unwrap_or_else(Self::default_journal_file),
            date_format: file_config
                .date_format
                .unwrap_or_else(|| "%A, %d %b %Y".to_string()),
            productive_tags: tags.productive.unwrap_or_else(|| {
                DEFAULT_PRODUCTIVE.iter().map(|t| t.to_string()).collect()
            }),
            recovery_tags: tags
                .recovery
                .unwrap_or_else(|| DEFAULT_RECOVERY.iter().map(|t| t.to_string()).collect()),
        }
    }

    /// The tag → category lookup table the engine consumes.
    pub fn categories(&self) -> TagCategories {
        TagCategories::with_sets(&self.productive_tags, &self.recovery_tags)
    }

    /// Default snapshot location: `{data_dir}/hourglass/journal.json`
    /// - macOS:   `~/Library/Application Support/hourglass/journal.json`
    /// - Linux:   `$XDG_DATA_HOME/hourglass/...` or `~/.local/share/hourglass/...`
    /// - Windows: `%APPDATA%\hourglass\journal.json`
    fn default_journal_file() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("hourglass");
            p.push("journal.json");
            p
        } else {
            PathBuf::from("./hourglass/journal.json")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("hourglass")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("hourglass").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::tags::TagCategory;
    use std::path::Path;

    /// Test helper to create a default `Config` for testing purposes.
    ///
    /// This is the single source of truth for test configuration.
    /// If you add a field to `Config`, you only need to update it here.
    pub(crate) fn mk_config(journal_file: PathBuf) -> Config {
        Config {
            journal_file,
            date_format: "%A, %d %b %Y".to_string(),
            productive_tags: DEFAULT_PRODUCTIVE.iter().map(|t| t.to_string()).collect(),
            recovery_tags: DEFAULT_RECOVERY.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("hourglass")
                .join("config.toml");
            let expected_native = b.config_dir().join("hourglass").join("config.toml");
            let c = super::Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_journal_file_and_date_format() {
        let toml = r#"
            journal_file = "/tmp/my-journal.json"
            date_format = "%Y-%m-%d"
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        assert_eq!(
            fc.journal_file.as_deref(),
            Some(Path::new("/tmp/my-journal.json"))
        );
        assert_eq!(fc.date_format.as_deref(), Some("%Y-%m-%d"));
    }

    #[test]
    fn parse_file_accepts_tag_overrides() {
        let toml = r#"
            [tags]
            productive = ["Writing", "Research"]
            recovery = ["Nap"]
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        let config = Config::from_file_config(fc);
        let cats = config.categories();
        assert_eq!(cats.category_of("Writing"), TagCategory::Productive);
        assert_eq!(cats.category_of("Nap"), TagCategory::Recovery);
        // Overrides replace the defaults entirely.
        assert_eq!(cats.category_of("Work"), TagCategory::Other);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = Config::from_file_config(FileConfig::default());
        assert_eq!(config.date_format, "%A, %d %b %Y");
        let cats = config.categories();
        assert_eq!(cats.category_of("Work"), TagCategory::Productive);
        assert_eq!(cats.category_of("Rest"), TagCategory::Recovery);
    }

    #[test]
    fn partial_tags_table_keeps_the_other_default() {
        let toml = r#"
            [tags]
            productive = ["Deep"]
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        let config = Config::from_file_config(fc);
        let cats = config.categories();
        assert_eq!(cats.category_of("Deep"), TagCategory::Productive);
        assert_eq!(cats.category_of("Rest"), TagCategory::Recovery);
        assert_eq!(cats.category_of("Work"), TagCategory::Other);
    }
}
