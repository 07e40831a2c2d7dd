// src/core/numeral.rs
//! Character classes used by comparison, and the rewrite of Chinese
//! place-value numerals into plain digit runs.

/// Chinese digits; the index is the value. 十 doubles as a power marker.
const CJK_DIGITS: [char; 11] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九', '十'];

/// Power-of-ten markers and the power each one stands for.
const POWERS_OF_TEN: [(char, u32); 7] = [
    ('十', 1),
    ('百', 2),
    ('千', 3),
    ('万', 4),
    ('萬', 4),
    ('亿', 8),
    ('億', 8),
];

const CJK_UNIFIED_FIRST: char = '\u{4e00}';
const CJK_UNIFIED_LAST: char = '\u{9fcf}';

/// Whether `c` lies in the CJK Unified Ideographs block (U+4E00..=U+9FCF).
pub fn is_cjk_unified(c: char) -> bool {
    (CJK_UNIFIED_FIRST..=CJK_UNIFIED_LAST).contains(&c)
}

pub fn contains_cjk_unified(chars: &[char]) -> bool {
    chars.iter().copied().any(is_cjk_unified)
}

/// Value of an ASCII digit or a Chinese digit from 零 to 十.
pub fn digit_value(c: char) -> Option<u32> {
    c.to_digit(10)
        .or_else(|| CJK_DIGITS.iter().position(|&d| d == c).map(|i| i as u32))
}

pub fn is_digit(c: char) -> bool {
    digit_value(c).is_some()
}

/// The power of ten a marker such as 百 or 萬 stands for.
pub fn power_of_ten(c: char) -> Option<u32> {
    POWERS_OF_TEN
        .iter()
        .find(|&&(marker, _)| marker == c)
        .map(|&(_, power)| power)
}

pub fn is_power_of_ten(c: char) -> bool {
    power_of_ten(c).is_some()
}

/// Unicode space separators (Zs, Zl, Zp). Tabs and newlines are not spaces.
pub fn is_space(c: char) -> bool {
    matches!(
        c,
        ' ' | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
    )
}

/// Rewrites place-value numeral runs so they read as decimal digit runs.
///
/// ```text
/// 十Y   -> 1Y       X百   -> X00
/// X十   -> X0       X百Y十 -> XY0
/// X十Y  -> XY       X百Y十Z -> XYZ
/// ```
///
/// A run made only of markers (no digit) is left alone. Digits are copied as
/// they are, so the output mixes Chinese and ASCII digits; it is meant for
/// comparison, not for display.
pub fn decimalize(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + 4);
    // end of the last rewritten run; everything before it is already in `out`
    let mut copied = 0;
    let mut i = 0;

    while i < chars.len() {
        if !is_power_of_ten(chars[i]) {
            i += 1;
            continue;
        }

        let mut has_digit = false;
        let mut start = i;
        while start > copied && is_digit(chars[start - 1]) {
            has_digit = true;
            start -= 1;
        }

        let mut end = i + 1;
        while end < chars.len() {
            let c = chars[end];
            if is_digit(c) {
                has_digit = true;
            } else if !is_power_of_ten(c) {
                break;
            }
            end += 1;
        }

        out.extend_from_slice(&chars[copied..start]);

        if has_digit {
            for (j, &c) in chars.iter().enumerate().take(end).skip(start) {
                match power_of_ten(c) {
                    Some(power) if j == start => {
                        out.extend(power.to_string().chars());
                    }
                    Some(power) if j == end - 1 => {
                        out.extend(std::iter::repeat('0').take(power as usize));
                    }
                    Some(_) => {}
                    None => out.push(c),
                }
            }
        } else {
            out.extend_from_slice(&chars[start..end]);
        }

        copied = end;
        i = end;
    }

    out.extend_from_slice(&chars[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> String {
        let chars: Vec<char> = s.chars().collect();
        decimalize(&chars).into_iter().collect()
    }

    #[test]
    fn test_place_value_rules() {
        assert_eq!(dec("十一"), "1一");
        assert_eq!(dec("三十"), "三0");
        assert_eq!(dec("二十一"), "二一");
        assert_eq!(dec("五百"), "五00");
        assert_eq!(dec("三百二十"), "三二0");
        assert_eq!(dec("三百二十一"), "三二一");
        assert_eq!(dec("三十二"), "三二");
    }

    #[test]
    fn test_myriads_and_duplicate_spellings() {
        assert_eq!(dec("五万"), "五0000");
        assert_eq!(dec("五萬"), "五0000");
        assert_eq!(dec("两亿"), "两亿"); // 两 is not a digit
        assert_eq!(dec("二億"), "二00000000");
    }

    #[test]
    fn test_marker_without_digits_is_untouched() {
        assert_eq!(dec("百"), "百");
        assert_eq!(dec("千萬"), "千萬");
        assert_eq!(dec("老百姓"), "老百姓");
    }

    #[test]
    fn test_surrounding_text_is_preserved() {
        assert_eq!(dec("第二十一章"), "第二一章");
        assert_eq!(dec("第十章和第三百页"), "第十章和第三00页");
        assert_eq!(dec("abc"), "abc");
        assert_eq!(dec(""), "");
    }

    #[test]
    fn test_ascii_digits_join_runs() {
        assert_eq!(dec("3百"), "300");
        assert_eq!(dec("12万"), "120000");
    }

    #[test]
    fn test_classification() {
        assert!(is_cjk_unified('中'));
        assert!(!is_cjk_unified('a'));
        assert!(!is_cjk_unified('〇'));
        assert_eq!(digit_value('7'), Some(7));
        assert_eq!(digit_value('九'), Some(9));
        assert_eq!(digit_value('十'), Some(10));
        assert_eq!(digit_value('百'), None);
        assert_eq!(power_of_ten('萬'), Some(4));
        assert!(is_space('\u{3000}'));
        assert!(!is_space('\t'));
    }
}
