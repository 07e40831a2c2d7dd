// src/core/compare.rs
//! Form-aware and natural string comparison.
//!
//! Natural comparison collapses spaces, compares digit runs (ASCII or
//! Chinese, after [`decimalize`]) by magnitude, and compares everything else
//! by simplified form or code point depending on the [`Comparison`] policy.

use crate::core::context::FormResolver;
use crate::core::numeral::{contains_cjk_unified, decimalize, digit_value, is_space};
use crate::core::registry::CharacterRegistry;
use crate::core::types::{same_entry, CanonicalEntry, Resolution};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How character forms and letter case take part in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Comparison {
    /// Raw code points; only digit values are mapped.
    #[default]
    Lexical,
    /// Equivalent forms are equal.
    IgnoreForm,
    /// Equivalent forms are equal until a final code-point tie-break.
    FoldForm,
    /// Same as `IgnoreForm`.
    IgnoreCase,
    /// Same as `FoldForm`.
    FoldCase,
    /// Phonetic folding is not implemented; behaves as `FoldForm`.
    PinyinFoldForm,
}

impl Comparison {
    pub const ALL: [Comparison; 6] = [
        Comparison::Lexical,
        Comparison::IgnoreForm,
        Comparison::FoldForm,
        Comparison::IgnoreCase,
        Comparison::FoldCase,
        Comparison::PinyinFoldForm,
    ];

    fn is_fold(self) -> bool {
        matches!(
            self,
            Comparison::FoldForm | Comparison::FoldCase | Comparison::PinyinFoldForm
        )
    }

    /// The policy used when neither side contains Chinese text.
    fn for_plain_text(self) -> Comparison {
        match self {
            Comparison::Lexical => Comparison::Lexical,
            Comparison::IgnoreForm | Comparison::IgnoreCase => Comparison::IgnoreCase,
            Comparison::FoldForm | Comparison::FoldCase | Comparison::PinyinFoldForm => {
                Comparison::FoldCase
            }
        }
    }

    fn name(self) -> &'static str {
        match self {
            Comparison::Lexical => "lexical",
            Comparison::IgnoreForm => "ignore-form",
            Comparison::FoldForm => "fold-form",
            Comparison::IgnoreCase => "ignore-case",
            Comparison::FoldCase => "fold-case",
            Comparison::PinyinFoldForm => "pinyin-fold-form",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Comparison {
    type Err = String;

    /// Accepts `fold-form`, `fold_form` and `FOLD_FORM` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Comparison::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| format!("unknown comparison policy '{}'", s))
    }
}

/// Upper-casing after lower-casing, keeping `c` when either mapping is not a
/// single character.
fn fold_case(c: char) -> char {
    fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
        match (it.next(), it.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
    let lower = single(c.to_lowercase()).unwrap_or(c);
    single(lower.to_uppercase()).unwrap_or(lower)
}

/// One side of a natural comparison: the characters, their resolutions (when
/// forms matter) and a cursor.
struct Side<'s> {
    chars: &'s [char],
    resolved: &'s [Resolution],
    pos: usize,
}

impl<'s> Side<'s> {
    fn new(chars: &'s [char], resolved: &'s [Resolution]) -> Self {
        Self {
            chars,
            resolved,
            pos: 0,
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn entry(&self) -> Option<&Arc<CanonicalEntry>> {
        self.resolved.get(self.pos).and_then(Option::as_ref)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_spaces(&mut self) -> bool {
        let start = self.pos;
        while self.current().is_some_and(is_space) {
            self.pos += 1;
        }
        self.pos != start
    }

    /// Skips zeros at the head of a digit run, keeping its last digit.
    fn skip_leading_zeros(&mut self, digit: fn(char) -> Option<u32>) {
        while self.digit(digit) == Some(0) && self.peek().and_then(digit).is_some() {
            self.pos += 1;
        }
    }

    fn digit(&self, digit: fn(char) -> Option<u32>) -> Option<u32> {
        self.current().and_then(digit)
    }

    /// The value this position compares by. `None` once past the end, which
    /// sorts before everything.
    fn effective(&self, policy: Comparison, digit: fn(char) -> Option<u32>) -> Option<u32> {
        let c = self.current()?;
        if let Some(d) = digit(c) {
            return Some(d);
        }
        if policy == Comparison::Lexical {
            return Some(c as u32);
        }
        match self.entry() {
            Some(entry) => Some(entry.simplified as u32),
            None => Some(fold_case(c) as u32),
        }
    }
}

/// Compares two digit runs by magnitude. Both sides start on a digit with
/// leading zeros already skipped; on `Equal` both cursors are past their run.
fn compare_digit_runs(a: &mut Side, b: &mut Side, digit: fn(char) -> Option<u32>) -> Ordering {
    let mut result = Ordering::Equal;
    loop {
        if result == Ordering::Equal {
            result = a.digit(digit).cmp(&b.digit(digit));
        }
        a.advance();
        b.advance();
        match (a.digit(digit), b.digit(digit)) {
            (None, None) => return result,
            // the shorter run is the smaller number
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(_), Some(_)) => {}
        }
    }
}

fn ascii_digit(c: char) -> Option<u32> {
    c.to_digit(10)
}

/// How a natural walk over both sides ended.
enum Walk {
    /// A position told the sides apart.
    Decided(Ordering),
    /// Both sides ran out together; `skipped` is set when spaces were passed
    /// over on the way.
    Exhausted { skipped: bool },
}

/// The shared natural walk. `resolved` slices are empty when forms do not
/// take part in the comparison.
fn natural_walk(
    a_chars: &[char],
    a_resolved: &[Resolution],
    b_chars: &[char],
    b_resolved: &[Resolution],
    policy: Comparison,
    digit: fn(char) -> Option<u32>,
) -> Walk {
    let mut a = Side::new(a_chars, a_resolved);
    let mut b = Side::new(b_chars, b_resolved);
    let mut skipped = false;

    loop {
        skipped |= a.skip_spaces();
        skipped |= b.skip_spaces();

        if a.digit(digit).is_some() && b.digit(digit).is_some() {
            // leading zeros never count as a skip: 007 and 7 are the same number
            a.skip_leading_zeros(digit);
            b.skip_leading_zeros(digit);
            match compare_digit_runs(&mut a, &mut b, digit) {
                Ordering::Equal => continue,
                unequal => return Walk::Decided(unequal),
            }
        }

        let (c1, c2) = (a.current(), b.current());
        if c1.is_none() && c2.is_none() {
            return Walk::Exhausted { skipped };
        }

        if c1 != c2 {
            let ordering = a
                .effective(policy, digit)
                .cmp(&b.effective(policy, digit));
            if ordering != Ordering::Equal {
                return Walk::Decided(ordering);
            }
        }
        a.advance();
        b.advance();
    }
}

/// Settles a walk that found no difference.
///
/// The ignore policies treat such sides as equal. The fold policies order
/// them by the raw code points of the original text. `Lexical` keeps them
/// equal unless spaces were skipped, then orders them by [`lexical_key`].
/// Each rule only refines the walk, so the result stays a total order.
fn settle(
    walk: Walk,
    policy: Comparison,
    raw: (&[char], &[char]),
    walked: (&[char], &[char]),
    digit: fn(char) -> Option<u32>,
) -> Ordering {
    let skipped = match walk {
        Walk::Decided(ordering) => return ordering,
        Walk::Exhausted { skipped } => skipped,
    };
    if policy.is_fold() {
        raw.0.cmp(raw.1)
    } else if policy == Comparison::Lexical && skipped {
        lexical_key(walked.0, digit).cmp(&lexical_key(walked.1, digit))
    } else {
        Ordering::Equal
    }
}

/// Code points with spaces kept, every digit written as its ASCII form and
/// the leading zeros of each digit run dropped. Two sides the walk found
/// equal without skipping spaces always have the same key.
fn lexical_key(chars: &[char], digit: fn(char) -> Option<u32>) -> Vec<u32> {
    let mut key = Vec::with_capacity(chars.len());
    let mut run_head = true;
    for (i, &c) in chars.iter().enumerate() {
        match digit(c) {
            Some(0) if run_head && chars.get(i + 1).copied().and_then(digit).is_some() => {}
            Some(d) => {
                key.push('0' as u32 + d);
                run_head = false;
            }
            None => {
                key.push(c as u32);
                run_head = true;
            }
        }
    }
    key
}

/// Position-by-position comparison of resolved sequences without numeric or
/// space handling.
fn compare_resolved(
    a: &[char],
    ra: &[Resolution],
    b: &[char],
    rb: &[Resolution],
    policy: Comparison,
) -> Ordering {
    let value = |chars: &[char], resolved: &[Resolution], i: usize| -> Option<u32> {
        let c = *chars.get(i)?;
        match resolved.get(i).and_then(Option::as_ref) {
            Some(entry) => Some(entry.simplified as u32),
            None => Some(fold_case(c) as u32),
        }
    };

    let mut i = 0;
    loop {
        let (c1, c2) = (a.get(i), b.get(i));
        if c1.is_none() && c2.is_none() {
            return if policy.is_fold() {
                a.cmp(b)
            } else {
                Ordering::Equal
            };
        }
        if c1 != c2 {
            let ordering = value(a, ra, i).cmp(&value(b, rb, i));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        i += 1;
    }
}

/// Natural comparison without any Chinese handling: ASCII digit runs, case
/// and space collapsing only.
pub fn compare_plain_natural(s1: &[char], s2: &[char], policy: Comparison) -> Ordering {
    let policy = policy.for_plain_text();
    let walk = natural_walk(s1, &[], s2, &[], policy, ascii_digit);
    settle(walk, policy, (s1, s2), (s1, s2), ascii_digit)
}

/// Natural comparison of two character sequences.
///
/// Chinese place-value numerals are rewritten to digit runs first, so
/// `二十一` sorts after `九` and `三百二十一` after `三十二`. When neither
/// side contains a CJK Unified Ideograph the comparison falls back to
/// [`compare_plain_natural`].
pub fn compare_natural_chars(
    registry: &CharacterRegistry,
    s1: &[char],
    s2: &[char],
    policy: Comparison,
) -> Ordering {
    if !contains_cjk_unified(s1) && !contains_cjk_unified(s2) {
        return compare_plain_natural(s1, s2, policy);
    }

    let chars1 = decimalize(s1);
    let chars2 = decimalize(s2);
    let walk = if policy == Comparison::Lexical {
        natural_walk(&chars1, &[], &chars2, &[], policy, digit_value)
    } else {
        let resolver = FormResolver::new(registry);
        let resolved1 = resolver.resolve(&chars1);
        let resolved2 = resolver.resolve(&chars2);
        natural_walk(&chars1, &resolved1, &chars2, &resolved2, policy, digit_value)
    };
    settle(walk, policy, (s1, s2), (&chars1, &chars2), digit_value)
}

pub fn compare_natural(
    registry: &CharacterRegistry,
    s1: &str,
    s2: &str,
    policy: Comparison,
) -> Ordering {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    compare_natural_chars(registry, &a, &b, policy)
}

/// Form-aware comparison without natural number or space handling.
///
/// Resolved characters compare by their simplified form; unresolved ones by
/// code point, case-folded. `Lexical` is plain code-point order.
pub fn compare_forms(
    registry: &CharacterRegistry,
    s1: &str,
    s2: &str,
    policy: Comparison,
) -> Ordering {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if policy == Comparison::Lexical {
        return a.cmp(&b);
    }
    let resolver = FormResolver::new(registry);
    compare_resolved(&a, &resolver.resolve(&a), &b, &resolver.resolve(&b), policy)
}

pub fn compare_fold_form(registry: &CharacterRegistry, s1: &str, s2: &str) -> Ordering {
    compare_forms(registry, s1, s2, Comparison::FoldForm)
}

pub fn compare_ignore_form(registry: &CharacterRegistry, s1: &str, s2: &str) -> Ordering {
    compare_forms(registry, s1, s2, Comparison::IgnoreForm)
}

/// Whether two strings are the same once character forms are ignored: the
/// same canonical entry at every position, or the same code point where
/// neither side resolves.
pub fn equals_ignore_form(registry: &CharacterRegistry, s1: &str, s2: &str) -> bool {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if a.len() != b.len() {
        return false;
    }
    let resolver = FormResolver::new(registry);
    let (ra, rb) = (resolver.resolve(&a), resolver.resolve(&b));
    a.iter()
        .zip(&b)
        .zip(ra.iter().zip(&rb))
        .all(|((c1, c2), (e1, e2))| match (e1, e2) {
            (Some(e1), Some(e2)) => same_entry(e1, e2),
            (None, None) => c1 == c2,
            _ => false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RawRecord;
    use Ordering::{Equal, Greater, Less};

    fn registry() -> CharacterRegistry {
        CharacterRegistry::build(vec![
            RawRecord::new("万萬"),
            RawRecord::new("栋棟"),
            RawRecord::new("楼樓"),
            RawRecord::new("国國"),
            RawRecord::new("后后").with_concept(&["皇~"]),
            RawRecord::new("后後").with_concept(&["以~"]),
        ])
    }

    fn nat(a: &str, b: &str, policy: Comparison) -> Ordering {
        compare_natural(&registry(), a, b, policy)
    }

    #[test]
    fn test_chinese_numerals_compare_by_magnitude() {
        assert_eq!(nat("十一", "九", Comparison::Lexical), Greater);
        assert_eq!(nat("二十一", "九", Comparison::Lexical), Greater);
        assert_eq!(nat("三百二十一", "三十二", Comparison::Lexical), Greater);
        assert_eq!(nat("十", "十", Comparison::Lexical), Equal);
        assert_eq!(nat("第九章", "第十章", Comparison::Lexical), Less);
        assert_eq!(nat("三万", "九千", Comparison::Lexical), Greater);
    }

    #[test]
    fn test_mixed_ascii_and_chinese_digits() {
        assert_eq!(nat("第12章", "第十一章", Comparison::FoldForm), Greater);
        assert_eq!(nat("第3章", "第三章", Comparison::IgnoreForm), Equal);
    }

    #[test]
    fn test_spaces_collapse_under_ignore_form() {
        assert_eq!(nat("第 9 章", "第9章", Comparison::IgnoreForm), Equal);
        assert_eq!(nat("第 9 章", "第9章", Comparison::IgnoreCase), Equal);
        assert_ne!(nat("第 9 章", "第9章", Comparison::Lexical), Equal);
    }

    #[test]
    fn test_leading_zeros_keep_magnitude() {
        assert_eq!(nat("第007a章", "第7b章", Comparison::FoldForm), Less);
        assert_eq!(nat("第007章", "第8章", Comparison::Lexical), Less);
        assert_eq!(nat("第010章", "第9章", Comparison::Lexical), Greater);
    }

    #[test]
    fn test_leading_zeros_compare_equal() {
        for policy in [Comparison::Lexical, Comparison::IgnoreForm, Comparison::IgnoreCase] {
            assert_eq!(nat("007", "7", policy), Equal, "{policy}");
            assert_eq!(nat("第007章", "第7章", policy), Equal, "{policy}");
            assert_eq!(nat("第零零七章", "第七章", policy), Equal, "{policy}");
        }
        // fold policies still separate the spellings
        assert_eq!(nat("007", "7", Comparison::FoldForm), Less);
        assert_eq!(nat("第007章", "第7章", Comparison::FoldCase), Less);
    }

    #[test]
    fn test_ignore_form_settles_spaced_digits() {
        let ignore = Comparison::IgnoreForm;
        assert_eq!(nat("第 3章", "第三章", ignore), Equal);
        assert_eq!(nat("第 三章", "第3章", ignore), Equal);
        assert_eq!(nat("第 007 章", "第七章", ignore), Equal);
        assert_eq!(nat("萬國 3", "万国三", ignore), Equal);
        assert_eq!(nat("第 3章", "第四章", ignore), Less);
    }

    #[test]
    fn test_lexical_orders_spaced_ties_by_normalized_digits() {
        let lex = Comparison::Lexical;
        assert_eq!(nat("三a", "3a", lex), Equal);
        assert_eq!(nat("三 a", "3a", lex), Less);
        assert_eq!(nat("三 a", "三a", lex), Less);
        assert_eq!(nat("第 007章", "第7章", lex), Less);
        assert_eq!(nat("第 007章", "第 7章", lex), Equal);
    }

    #[test]
    fn test_every_policy_is_transitive() {
        let samples = [
            "", "第 3章", "第3章", "第三章", "第 三章", "第03章", "第 003 章", "第十章",
            "第10章", "第 十 章", "萬國3", "万国 3", "万国三", "萬國 03", "以后", "以後",
            "abc", "ABC", "a 1", "a1", "a01", "三a", "3a", "三 a", "1b", "01b", "1 b",
        ];
        let reg = registry();
        for policy in Comparison::ALL {
            for a in samples {
                for b in samples {
                    let ab = compare_natural(&reg, a, b, policy);
                    assert_eq!(ab, compare_natural(&reg, b, a, policy).reverse());
                    for c in samples {
                        let bc = compare_natural(&reg, b, c, policy);
                        let ac = compare_natural(&reg, a, c, policy);
                        if ab != Greater && bc != Greater {
                            assert_ne!(ac, Greater, "{a:?} <= {b:?} <= {c:?} under {policy}");
                        }
                        if ab == Equal && bc == Equal {
                            assert_eq!(ac, Equal, "{a:?} = {b:?} = {c:?} under {policy}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_fold_form_orders_equivalent_forms_by_code_point() {
        assert_eq!(nat("九棟五樓", "九栋十一樓", Comparison::FoldForm), Less);
        assert_eq!(nat("萬國", "万国", Comparison::FoldForm), Greater);
        assert_eq!(nat("萬國", "万国", Comparison::IgnoreForm), Equal);
        assert_eq!(nat("萬國", "万国", Comparison::PinyinFoldForm), Greater);
        assert_ne!(nat("萬國", "万国", Comparison::Lexical), Equal);
    }

    #[test]
    fn test_identity_for_every_policy() {
        for policy in Comparison::ALL {
            for s in ["", "第 007 章", "萬國 abc", "Hello 10", "以後"] {
                assert_eq!(nat(s, s, policy), Equal, "{s} under {policy}");
            }
        }
    }

    #[test]
    fn test_fold_form_is_antisymmetric() {
        let samples = ["万国", "萬國", "第十章", "第10章", "abc", "ABC", "以後", "以后 "];
        for a in samples {
            for b in samples {
                assert_eq!(
                    nat(a, b, Comparison::FoldForm),
                    nat(b, a, Comparison::FoldForm).reverse(),
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn test_plain_text_path() {
        let reg = CharacterRegistry::empty();
        assert_eq!(compare_natural(&reg, "a10", "a9", Comparison::Lexical), Greater);
        assert_eq!(compare_natural(&reg, "abc", "ABC", Comparison::IgnoreCase), Equal);
        assert_eq!(compare_natural(&reg, "abc", "ABC", Comparison::FoldCase), Greater);
        assert_eq!(compare_natural(&reg, "abd", "abc", Comparison::Lexical), Greater);
        assert_eq!(compare_natural(&reg, "ab", "abc", Comparison::Lexical), Less);
    }

    #[test]
    fn test_lexical_matches_code_points_without_digits_or_spaces() {
        let reg = registry();
        let samples = ["abc", "abd", "ab", "Zeta", "zeta", ""];
        for a in samples {
            for b in samples {
                assert_eq!(compare_natural(&reg, a, b, Comparison::Lexical), a.cmp(b));
                assert_eq!(compare_forms(&reg, a, b, Comparison::Lexical), a.cmp(b));
            }
        }
    }

    #[test]
    fn test_unregistered_characters_compare_by_code_point() {
        assert_eq!(nat("中", "丰", Comparison::FoldForm), '中'.cmp(&'丰'));
        assert_eq!(nat("甲", "乙", Comparison::IgnoreForm), '甲'.cmp(&'乙'));
    }

    #[test]
    fn test_compare_forms() {
        let reg = registry();
        assert_eq!(compare_ignore_form(&reg, "萬國", "万国"), Equal);
        assert_eq!(compare_fold_form(&reg, "萬國", "万国"), Greater);
        assert_eq!(compare_ignore_form(&reg, "万", "万国"), Less);
        assert_eq!(compare_ignore_form(&reg, "Abc", "aBC"), Equal);
        // one side resolved: its simplified form against the other's folded code point
        assert_eq!(compare_ignore_form(&reg, "萬", "中"), '万'.cmp(&'中'));
        assert_eq!(compare_ignore_form(&reg, "a", "萬"), 'A'.cmp(&'万'));
    }

    #[test]
    fn test_equals_ignore_form() {
        let reg = registry();
        assert!(equals_ignore_form(&reg, "萬國", "万国"));
        assert!(equals_ignore_form(&reg, "以後", "以后"));
        assert!(!equals_ignore_form(&reg, "皇后", "皇後"));
        assert!(!equals_ignore_form(&reg, "万", "万国"));
        assert!(!equals_ignore_form(&reg, "a", "b"));
    }

    #[test]
    fn test_policy_names() {
        assert_eq!("fold-form".parse::<Comparison>(), Ok(Comparison::FoldForm));
        assert_eq!("PINYIN_FOLD_FORM".parse::<Comparison>(), Ok(Comparison::PinyinFoldForm));
        assert!("phonetic".parse::<Comparison>().is_err());
        assert_eq!(Comparison::IgnoreCase.to_string(), "ignore-case");
    }

    #[test]
    fn test_fold_case() {
        assert_eq!(fold_case('a'), 'A');
        assert_eq!(fold_case('Ä'), 'Ä');
        assert_eq!(fold_case('中'), '中');
        assert_eq!(fold_case('ß'), 'ß');
    }
}
