// src/lib.rs
//! Traditional/simplified Chinese form resolution and natural ordering.
//!
//! ```
//! use hanzi_core::{Comparison, HanziEngine, RawRecord};
//! use std::cmp::Ordering;
//!
//! let engine = HanziEngine::from_records(vec![RawRecord::new("万萬"), RawRecord::new("国國")]);
//! assert_eq!(engine.to_traditional("万国").unwrap(), "萬國");
//! assert_eq!(
//!     engine.compare_natural("二十一", "九", Comparison::Lexical).unwrap(),
//!     Ordering::Greater
//! );
//! ```

pub mod coding;
pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod persistence;

pub use crate::config::HanziConfig;
pub use crate::core::compare::{
    compare_fold_form, compare_forms, compare_ignore_form, compare_natural,
    compare_natural_chars, compare_plain_natural, equals_ignore_form, Comparison,
};
pub use crate::core::context::FormResolver;
pub use crate::core::converter::FormConverter;
pub use crate::core::engine::HanziEngine;
pub use crate::core::numeral::decimalize;
pub use crate::core::registry::CharacterRegistry;
pub use crate::core::types::{
    CanonicalEntry, Concept, EntrySet, Pronunciation, RawRecord, Resolution,
};
pub use crate::error::{HanziError, Result};
