// File: src/config.rs
use crate::core::compare::Comparison;
use crate::error::{HanziError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Dictionary file looked up in the working directory when nothing else is set.
pub const DEFAULT_DICTIONARY: &str = "chinese.csv";

/// Environment variable naming the dictionary file.
pub const DICTIONARY_ENV: &str = "HANZI_DICTIONARY";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HanziConfig {
    /// Text dictionary in the record line format.
    pub dictionary_path: Option<PathBuf>,
    /// Binary snapshot; preferred over the text dictionary when it exists.
    pub snapshot_path: Option<PathBuf>,
    pub default_policy: Comparison,
}

impl HanziConfig {
    /// Reads a JSON config file. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|e| HanziError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The dictionary to read: the configured path, then `$HANZI_DICTIONARY`,
    /// then `chinese.csv`.
    pub fn dictionary_path(&self) -> PathBuf {
        self.dictionary_path
            .clone()
            .or_else(|| std::env::var_os(DICTIONARY_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARY))
    }

    /// The snapshot path, if one is configured and present on disk.
    pub fn existing_snapshot(&self) -> Option<&Path> {
        self.snapshot_path.as_deref().filter(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = HanziConfig::load(Path::new("/no/such/hanzi.json")).unwrap();
        assert_eq!(config, HanziConfig::default());
        assert_eq!(config.default_policy, Comparison::Lexical);
    }

    #[test]
    fn test_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "dictionary_path": "dict/chinese.csv", "default_policy": "FOLD_FORM" }}"#
        )
        .unwrap();

        let config = HanziConfig::load(file.path()).unwrap();
        assert_eq!(config.default_policy, Comparison::FoldForm);
        assert_eq!(config.dictionary_path(), PathBuf::from("dict/chinese.csv"));
        assert!(config.existing_snapshot().is_none());
    }

    #[test]
    fn test_bad_json_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            HanziConfig::load(file.path()),
            Err(HanziError::Config(_))
        ));
    }
}
