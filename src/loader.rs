// File: src/loader.rs
//! Reading dictionary records from their line-oriented text format.
//!
//! ```text
//! # simplified traditional [variants], pronunciation, concept, concept...
//! 后後,hou4,以~;~来,然~
//! ```
//!
//! Fields are separated by `,` or `，`; vocabulary inside a concept by `;`,
//! `；` or `。`.

use crate::core::types::RawRecord;
use crate::error::{HanziError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

pub const FIELD_DELIMITERS: [char; 2] = [',', '，'];
pub const VOCABULARY_DELIMITERS: [char; 3] = [';', '；', '。'];

/// Parses one line. Comments (`#`) and blank lines give `None`.
pub fn parse_line(line: &str) -> Option<RawRecord> {
    let line = line
        .trim_start_matches('\u{feff}')
        .trim_end_matches(&['\r', '\n'][..]);
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut fields = line.split(&FIELD_DELIMITERS[..]);
    let spelling = fields.next().unwrap_or_default().to_string();
    let pronunciation = fields
        .next()
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    let concepts = fields
        .map(|group| {
            group
                .split(&VOCABULARY_DELIMITERS[..])
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|group| !group.is_empty())
        .collect();

    Some(RawRecord {
        spelling,
        pronunciation,
        concepts,
    })
}

/// Reads all records from a UTF-8 line reader.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        if let Some(record) = parse_line(&line?) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Reads all records from a dictionary file.
pub fn load_path(path: &Path) -> Result<Vec<RawRecord>> {
    if path.as_os_str().is_empty() {
        return Err(HanziError::InvalidArgument("empty dictionary path".into()));
    }
    if !path.exists() {
        return Err(HanziError::DictionaryNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|e| HanziError::io(path, e))?;
    let records = read_records(BufReader::new(file)).map_err(|e| match e {
        HanziError::Read(source) => HanziError::io(path, source),
        other => other,
    })?;
    info!(path = %path.display(), records = records.len(), "loaded dictionary");
    Ok(records)
}
