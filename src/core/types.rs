// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque pronunciation payload carried by a canonical entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pronunciation(pub String);

impl fmt::Display for Pronunciation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A group of vocabulary strings that share a meaning for one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub vocabs: Vec<String>,
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.vocabs.join(";"))
    }
}

/// One logical Chinese character across its traditional, simplified and
/// variant spellings.
///
/// Entries are shared through `Arc` and never mutated after the registry is
/// built. Two entries are the same character iff they are the same instance,
/// see [`same_entry`].
#[derive(Debug)]
pub struct CanonicalEntry {
    pub traditional: char,
    pub simplified: char,
    pub variants: Vec<char>,
    pub pronunciation: Option<Pronunciation>,
    pub concepts: Vec<Concept>,
}

impl CanonicalEntry {
    /// The spelling cluster in record order: simplified, traditional, variants.
    pub fn spelling(&self) -> String {
        let mut s = String::with_capacity(4 * (2 + self.variants.len()));
        s.push(self.simplified);
        s.push(self.traditional);
        s.extend(self.variants.iter());
        s
    }

    /// Returns the record this entry was built from, with placeholders
    /// already expanded.
    pub fn to_record(&self) -> RawRecord {
        RawRecord {
            spelling: self.spelling(),
            pronunciation: self.pronunciation.as_ref().map(|p| p.0.clone()),
            concepts: self.concepts.iter().map(|c| c.vocabs.clone()).collect(),
        }
    }
}

impl fmt::Display for CanonicalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling())?;
        match &self.pronunciation {
            Some(p) => write!(f, ",{}", p)?,
            // keep concept columns aligned
            None if !self.concepts.is_empty() => f.write_str(",")?,
            None => {}
        }
        for concept in &self.concepts {
            write!(f, ",{}", concept)?;
        }
        Ok(())
    }
}

/// Identity comparison for canonical entries.
pub fn same_entry(a: &Arc<CanonicalEntry>, b: &Arc<CanonicalEntry>) -> bool {
    Arc::ptr_eq(a, b)
}

/// The resolved identity of one input position; `None` when the code point
/// is not registered.
pub type Resolution = Option<Arc<CanonicalEntry>>;

/// A decoded dictionary record, before it is turned into a [`CanonicalEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Simplified, traditional, then variant code points, no separators.
    pub spelling: String,
    pub pronunciation: Option<String>,
    /// Vocabulary groups; `~` stands for the record's traditional character.
    pub concepts: Vec<Vec<String>>,
}

impl RawRecord {
    pub fn new(spelling: &str) -> Self {
        Self {
            spelling: spelling.to_string(),
            ..Self::default()
        }
    }

    pub fn with_pronunciation(mut self, pronunciation: &str) -> Self {
        self.pronunciation = Some(pronunciation.to_string());
        self
    }

    pub fn with_concept<S: AsRef<str>>(mut self, vocabs: &[S]) -> Self {
        self.concepts
            .push(vocabs.iter().map(|v| v.as_ref().to_string()).collect());
        self
    }
}

/// An insertion-ordered set of shared entries, deduplicated by identity.
#[derive(Debug, Clone, Default)]
pub struct EntrySet {
    entries: Vec<Arc<CanonicalEntry>>,
}

impl EntrySet {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends `entry` unless the same instance is already present.
    pub fn insert(&mut self, entry: &Arc<CanonicalEntry>) -> bool {
        if self.contains(entry) {
            return false;
        }
        self.entries.push(Arc::clone(entry));
        true
    }

    pub fn union_with(&mut self, other: &EntrySet) {
        for entry in &other.entries {
            self.insert(entry);
        }
    }

    pub fn contains(&self, entry: &Arc<CanonicalEntry>) -> bool {
        self.entries.iter().any(|e| same_entry(e, entry))
    }

    pub fn first(&self) -> Option<&Arc<CanonicalEntry>> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<CanonicalEntry>> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a EntrySet {
    type Item = &'a Arc<CanonicalEntry>;
    type IntoIter = std::slice::Iter<'a, Arc<CanonicalEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
