use crate::core::context::FormResolver;
use crate::core::registry::CharacterRegistry;

/// Rewrites text into a single character form.
#[derive(Clone, Copy)]
pub struct FormConverter<'a> {
    resolver: FormResolver<'a>,
}

impl<'a> FormConverter<'a> {
    pub fn new(registry: &'a CharacterRegistry) -> Self {
        Self {
            resolver: FormResolver::new(registry),
        }
    }

    /// Emits the traditional or simplified form of every resolved character;
    /// unknown characters pass through unchanged.
    pub fn to_form(&self, chars: &[char], want_traditional: bool) -> String {
        let resolved = self.resolver.resolve(chars);
        let mut result = String::with_capacity(chars.len() * 3);
        for (&c, entry) in chars.iter().zip(&resolved) {
            result.push(match entry {
                Some(e) if want_traditional => e.traditional,
                Some(e) => e.simplified,
                None => c,
            });
        }
        result
    }

    pub fn to_traditional(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        self.to_form(&chars, true)
    }

    pub fn to_simplified(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        self.to_form(&chars, false)
    }
}
