// File: src/coding.rs
//! Big5 byte detection.
//!
//! A Big5 character is two bytes: lead byte A1..=FE, trail byte 40..=7E or
//! A1..=FE.

fn is_big5_lead(b: u8) -> bool {
    (0xA1..=0xFE).contains(&b)
}

fn is_big5_trail(b: u8) -> bool {
    (0x40..=0x7E).contains(&b) || (0xA1..=0xFE).contains(&b)
}

/// Number of bytes from `start` that form consecutive Big5 pairs, stopping
/// at the first pair that is not Big5. Always even.
pub fn detect_big5(buf: &[u8], start: usize) -> usize {
    if buf.len() < 2 || start >= buf.len() {
        return 0;
    }
    buf[start..]
        .chunks_exact(2)
        .take_while(|pair| is_big5_lead(pair[0]) && is_big5_trail(pair[1]))
        .count()
        * 2
}

/// Number of Big5 characters from `start` to the end. A bad lead byte moves
/// on by one byte, a bad trail byte skips the whole pair.
pub fn count_big5(buf: &[u8], start: usize) -> usize {
    if buf.len() < 2 {
        return 0;
    }
    let mut count = 0;
    let mut i = start;
    while i + 1 < buf.len() {
        if !is_big5_lead(buf[i]) {
            i += 1;
            continue;
        }
        if is_big5_trail(buf[i + 1]) {
            count += 1;
        }
        i += 2;
    }
    count
}
