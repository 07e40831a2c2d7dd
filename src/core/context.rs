// File: src/core/context.rs
use crate::core::registry::CharacterRegistry;
use crate::core::types::{CanonicalEntry, EntrySet, Resolution};
use std::sync::Arc;
use tracing::trace;

/// Longest and shortest vocabulary windows tried around an ambiguous position.
const MAX_WINDOW: usize = 4;
const MIN_WINDOW: usize = 2;

/// Maps each position of a character sequence to its canonical entry.
///
/// A code point shared by several entries is disambiguated by the longest
/// vocabulary window around it that the registry knows.
#[derive(Clone, Copy)]
pub struct FormResolver<'a> {
    registry: &'a CharacterRegistry,
}

impl<'a> FormResolver<'a> {
    pub fn new(registry: &'a CharacterRegistry) -> Self {
        Self { registry }
    }

    /// One slot per input code point; `None` where the code point is unknown.
    pub fn resolve(&self, chars: &[char]) -> Vec<Resolution> {
        (0..chars.len())
            .map(|i| {
                let candidates = self.registry.lookup_by_codepoint(chars[i]);
                match candidates.len() {
                    0 => None,
                    1 => candidates.first().cloned(),
                    _ => Some(Arc::clone(self.disambiguate(chars, i, candidates))),
                }
            })
            .collect()
    }

    fn disambiguate<'c>(
        &self,
        chars: &[char],
        i: usize,
        candidates: &'c EntrySet,
    ) -> &'c Arc<CanonicalEntry> {
        // `candidates` has at least two members here
        let fallback = &candidates.iter().as_slice()[0];

        let Some((window, matched)) = self.find_vocabulary(chars, i) else {
            return fallback;
        };

        for entry in matched {
            if let Some(hit) = candidates.iter().find(|c| Arc::ptr_eq(c, entry)) {
                trace!(%window, chosen = %hit.traditional, "resolved ambiguous character");
                return hit;
            }
        }
        fallback
    }

    /// The first known vocabulary among the windows covering position `i`,
    /// longest windows first.
    fn find_vocabulary(&self, chars: &[char], i: usize) -> Option<(String, &'a EntrySet)> {
        for len in (MIN_WINDOW..=MAX_WINDOW).rev() {
            for start in window_starts(i, len, chars.len()) {
                let window: String = chars[start..start + len].iter().collect();
                let matched = self.registry.lookup_by_vocabulary(&window);
                if !matched.is_empty() {
                    return Some((window, matched));
                }
            }
        }
        None
    }
}

/// Start offsets of the `len`-wide windows that contain `i` and fit in `n`.
///
/// Tried in a fixed order: the window starting one before `i`, the window
/// ending at `i`, then the rest from left to right, ending with the window
/// starting at `i`.
fn window_starts(i: usize, len: usize, n: usize) -> Vec<usize> {
    let fits = |start: usize| start <= i && i < start + len && start + len <= n;
    let mut starts = Vec::with_capacity(len);
    let mut push = |start: usize| {
        if fits(start) && !starts.contains(&start) {
            starts.push(start);
        }
    };

    if i >= 1 {
        push(i - 1);
    }
    if i + 1 >= len {
        push(i + 1 - len);
    }
    for start in i.saturating_sub(len - 1)..=i {
        push(start);
    }
    starts
}
