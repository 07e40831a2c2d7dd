// File: src/persistence.rs
use crate::core::registry::CharacterRegistry;
use crate::core::types::RawRecord;
use crate::error::{HanziError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Line ending used for every text file this crate writes.
pub const LINE_END: &str = "\r\n";

/// The serializable state of a registry: its records, in load order.
#[derive(Serialize, Deserialize)]
struct SerializableState {
    records: Vec<RawRecord>,
}

/// Writes through a temporary file in the target directory and renames it
/// into place, so readers never see a half-written file.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| HanziError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| HanziError::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush().map_err(|e| HanziError::io(path, e))?;
    }
    temp_file
        .persist(path)
        .map_err(|e| HanziError::io(path, e.error))?;
    Ok(())
}

/// Saves the registry as a binary snapshot.
pub fn save_snapshot(registry: &CharacterRegistry, path: &Path) -> Result<()> {
    let state = SerializableState {
        records: registry.records(),
    };
    write_atomically(path, |writer| {
        bincode::serialize_into(writer, &state)?;
        Ok(())
    })?;
    info!(path = %path.display(), records = state.records.len(), "saved snapshot");
    Ok(())
}

/// Loads a binary snapshot and rebuilds the registry from it.
pub fn load_snapshot(path: &Path) -> Result<CharacterRegistry> {
    let file = File::open(path).map_err(|e| HanziError::io(path, e))?;
    let state: SerializableState = bincode::deserialize_from(BufReader::new(file))?;
    info!(path = %path.display(), records = state.records.len(), "loaded snapshot");
    Ok(CharacterRegistry::build(state.records))
}

/// Saves the registry in the text record format, one entry per line, in the
/// order the entries were read.
pub fn save_records(registry: &CharacterRegistry, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(HanziError::InvalidArgument("empty output file name".into()));
    }
    write_atomically(path, |writer| {
        for entry in registry.entries() {
            write!(writer, "{}{}", entry, LINE_END).map_err(|e| HanziError::io(path, e))?;
        }
        Ok(())
    })
}
