use crate::config::HanziConfig;
use crate::core::compare::{self, Comparison};
use crate::core::converter::FormConverter;
use crate::core::registry::CharacterRegistry;
use crate::core::types::RawRecord;
use crate::error::{HanziError, Result};
use crate::loader;
use crate::persistence::{self, write_atomically, LINE_END};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, info};

/// Where the registry comes from when it is first needed.
#[derive(Debug, Clone)]
enum RegistrySource {
    Prebuilt,
    Dictionary(PathBuf),
    Snapshot(PathBuf),
}

impl RegistrySource {
    fn load(&self) -> Result<CharacterRegistry> {
        match self {
            // the cell is filled at construction, so this is never reached
            RegistrySource::Prebuilt => Ok(CharacterRegistry::empty()),
            RegistrySource::Dictionary(path) => {
                Ok(CharacterRegistry::build(loader::load_path(path)?))
            }
            RegistrySource::Snapshot(path) => persistence::load_snapshot(path),
        }
    }
}

/// Entry point tying the registry to conversion and comparison.
///
/// The registry is built at most once, on first use, even when several
/// threads ask for it at the same time. Once built it is shared read-only.
pub struct HanziEngine {
    source: RegistrySource,
    registry: OnceLock<Arc<CharacterRegistry>>,
    build_lock: Mutex<()>,
}

impl HanziEngine {
    pub fn new(registry: CharacterRegistry) -> Self {
        Self {
            source: RegistrySource::Prebuilt,
            registry: OnceLock::from(Arc::new(registry)),
            build_lock: Mutex::new(()),
        }
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self::new(CharacterRegistry::build(records))
    }

    /// Reads the dictionary file lazily, on first use.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::lazy(RegistrySource::Dictionary(path.into()))
    }

    /// Prefers an existing snapshot over the text dictionary.
    pub fn from_config(config: &HanziConfig) -> Self {
        match config.existing_snapshot() {
            Some(snapshot) => Self::lazy(RegistrySource::Snapshot(snapshot.to_path_buf())),
            None => Self::from_path(config.dictionary_path()),
        }
    }

    fn lazy(source: RegistrySource) -> Self {
        Self {
            source,
            registry: OnceLock::new(),
            build_lock: Mutex::new(()),
        }
    }

    /// The registry, built on first call. A failed build is not cached; the
    /// next call tries again.
    pub fn registry(&self) -> Result<&Arc<CharacterRegistry>> {
        if let Some(registry) = self.registry.get() {
            return Ok(registry);
        }
        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(registry) = self.registry.get() {
            return Ok(registry);
        }
        debug!(source = ?self.source, "building character registry");
        let registry = self.source.load()?;
        Ok(self.registry.get_or_init(|| Arc::new(registry)))
    }

    /// A handle to the registry that can move to other threads.
    pub fn shared_registry(&self) -> Result<Arc<CharacterRegistry>> {
        self.registry().map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.registry.get().is_some()
    }

    /// Replaces the registry with one built from `records`. The new tables are
    /// complete before they become visible.
    pub fn reload<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let registry = CharacterRegistry::build(records);
        info!(entries = registry.len(), "reloaded character registry");
        self.registry = OnceLock::from(Arc::new(registry));
        self.source = RegistrySource::Prebuilt;
    }

    pub fn to_traditional(&self, text: &str) -> Result<String> {
        Ok(FormConverter::new(self.registry()?).to_traditional(text))
    }

    pub fn to_simplified(&self, text: &str) -> Result<String> {
        Ok(FormConverter::new(self.registry()?).to_simplified(text))
    }

    pub fn compare_natural(&self, s1: &str, s2: &str, policy: Comparison) -> Result<Ordering> {
        Ok(compare::compare_natural(self.registry()?, s1, s2, policy))
    }

    pub fn compare_forms(&self, s1: &str, s2: &str, policy: Comparison) -> Result<Ordering> {
        Ok(compare::compare_forms(self.registry()?, s1, s2, policy))
    }

    pub fn equals_ignore_form(&self, s1: &str, s2: &str) -> Result<bool> {
        Ok(compare::equals_ignore_form(self.registry()?, s1, s2))
    }

    /// Sorts lines in natural order. The sort is stable.
    pub fn sort_natural<S: AsRef<str>>(&self, lines: &mut [S], policy: Comparison) -> Result<()> {
        let registry = self.registry()?;
        let mut keyed: Vec<(Vec<char>, usize)> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line.as_ref().chars().collect(), i))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| compare::compare_natural_chars(registry, a, b, policy));

        let order: Vec<usize> = keyed.into_iter().map(|(_, i)| i).collect();
        apply_permutation(lines, order);
        Ok(())
    }

    /// Converts a text file line by line into one character form.
    pub fn convert_file(&self, input: &Path, output: &Path, traditional: bool) -> Result<usize> {
        if input.as_os_str().is_empty() {
            return Err(HanziError::InvalidArgument("empty input file name".into()));
        }
        if output.as_os_str().is_empty() {
            return Err(HanziError::InvalidArgument("empty output file name".into()));
        }
        let converter = FormConverter::new(self.registry()?);
        let reader = BufReader::new(File::open(input).map_err(|e| HanziError::io(input, e))?);

        let mut lines = 0;
        write_atomically(output, |writer| {
            for line in reader.lines() {
                let line = line.map_err(|e| HanziError::io(input, e))?;
                let converted = if traditional {
                    converter.to_traditional(&line)
                } else {
                    converter.to_simplified(&line)
                };
                write!(writer, "{}{}", converted, LINE_END).map_err(|e| HanziError::io(output, e))?;
                lines += 1;
            }
            Ok(())
        })?;
        info!(input = %input.display(), output = %output.display(), lines, "converted file");
        Ok(lines)
    }
}

/// Reorders `items` so that position `k` holds the item previously at `order[k]`.
fn apply_permutation<T>(items: &mut [T], mut order: Vec<usize>) {
    for start in 0..order.len() {
        let mut current = start;
        while order[current] != start {
            let next = order[current];
            items.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}
