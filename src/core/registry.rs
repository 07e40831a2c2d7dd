// --- File: src/core/registry.rs
use crate::core::converter::FormConverter;
use crate::core::types::{CanonicalEntry, Concept, EntrySet, Pronunciation, RawRecord};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, warn};

/// Stands for the traditional form of the character a concept belongs to.
pub const PLACEHOLDERS: [char; 2] = ['~', '～'];

static EMPTY_SET: EntrySet = EntrySet::new();

/// In-memory index from code points and vocabulary strings to canonical
/// entries. Built once, then only read.
#[derive(Debug, Default)]
pub struct CharacterRegistry {
    entries: Vec<Arc<CanonicalEntry>>,
    by_codepoint: HashMap<char, EntrySet>,
    /// Ordered so that cross-form propagation visits keys deterministically.
    by_vocabulary: BTreeMap<String, EntrySet>,
}

impl CharacterRegistry {
    /// A registry with no characters: every lookup is empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the tables from records in order. Records whose spelling
    /// cluster has fewer than two code points are skipped.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut registry = Self::empty();
        let mut skipped = 0usize;
        for record in records {
            if !registry.insert_record(record) {
                skipped += 1;
            }
        }
        registry.propagate_vocabulary();
        debug!(
            entries = registry.entries.len(),
            codepoints = registry.by_codepoint.len(),
            vocabularies = registry.by_vocabulary.len(),
            skipped,
            "built character registry"
        );
        registry
    }

    fn insert_record(&mut self, record: RawRecord) -> bool {
        let cluster: Vec<char> = record.spelling.chars().collect();
        if cluster.len() < 2 {
            warn!(spelling = %record.spelling, "skipping record with short spelling cluster");
            return false;
        }
        let (simplified, traditional) = (cluster[0], cluster[1]);

        let concepts: Vec<Concept> = record
            .concepts
            .iter()
            .map(|group| Concept {
                vocabs: group
                    .iter()
                    .map(|v| v.replace(&PLACEHOLDERS[..], &traditional.to_string()))
                    .filter(|v| !v.is_empty())
                    .collect(),
            })
            .filter(|c| !c.vocabs.is_empty())
            .collect();

        let entry = Arc::new(CanonicalEntry {
            traditional,
            simplified,
            variants: cluster[2..].to_vec(),
            pronunciation: record.pronunciation.map(Pronunciation),
            concepts,
        });

        for (i, &c) in cluster.iter().enumerate() {
            if i > 0 && cluster[i - 1] == c {
                continue;
            }
            self.by_codepoint.entry(c).or_default().insert(&entry);
        }
        for vocab in entry.concepts.iter().flat_map(|c| c.vocabs.iter()) {
            self.by_vocabulary
                .entry(vocab.clone())
                .or_default()
                .insert(&entry);
        }

        self.entries.push(entry);
        true
    }

    /// Makes every vocabulary reachable through its all-simplified and
    /// all-traditional spelling as well.
    fn propagate_vocabulary(&mut self) {
        let keys: Vec<String> = self.by_vocabulary.keys().cloned().collect();
        for key in keys {
            let chars: Vec<char> = key.chars().collect();
            let (simplified, traditional) = {
                let converter = FormConverter::new(self);
                (
                    converter.to_form(&chars, false),
                    converter.to_form(&chars, true),
                )
            };

            let mut owners = self.lookup_by_vocabulary(&key).clone();
            owners.union_with(self.lookup_by_vocabulary(&simplified));
            owners.union_with(self.lookup_by_vocabulary(&traditional));

            self.by_vocabulary.insert(simplified, owners.clone());
            self.by_vocabulary.insert(traditional, owners);
        }
    }

    pub fn lookup_by_codepoint(&self, c: char) -> &EntrySet {
        self.by_codepoint.get(&c).unwrap_or(&EMPTY_SET)
    }

    pub fn lookup_by_vocabulary(&self, vocab: &str) -> &EntrySet {
        self.by_vocabulary.get(vocab).unwrap_or(&EMPTY_SET)
    }

    /// All entries in the order their records were read.
    pub fn entries(&self) -> &[Arc<CanonicalEntry>] {
        &self.entries
    }

    /// The records this registry was built from, placeholders expanded.
    pub fn records(&self) -> Vec<RawRecord> {
        self.entries.iter().map(|e| e.to_record()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
