//! Short-code addressing.
//!
//! Codes of five or more characters are looked up verbatim. Shorter codes are
//! case-sensitive but the page store may collate case-insensitively, so they
//! are looked up through a numeric index instead: bijective base-62 over
//! `0-9a-zA-Z`, most significant character first, digit values 1..=62.

/// Codes at least this long are matched directly on the `code` column.
pub const DIRECT_MATCH_MIN_LEN: usize = 5;

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const BASE: i64 = 62;

/// How a code must be looked up in the page store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLookup<'a> {
    Exact(&'a str),
    Index(i64),
    /// Empty, or a short code with characters outside the alphabet.
    Unresolvable,
}

pub fn classify(code: &str) -> CodeLookup<'_> {
    if code.is_empty() {
        return CodeLookup::Unresolvable;
    }
    if code.chars().count() >= DIRECT_MATCH_MIN_LEN {
        return CodeLookup::Exact(code);
    }
    match code_to_index(code) {
        Some(index) => CodeLookup::Index(index),
        None => CodeLookup::Unresolvable,
    }
}

fn digit_value(c: char) -> Option<i64> {
    if !c.is_ascii() {
        return None;
    }
    ALPHABET
        .iter()
        .position(|&b| b == c as u8)
        .map(|pos| pos as i64 + 1)
}

/// Encodes a code into its lookup index. Returns `None` for the empty string,
/// for characters outside the alphabet, or on overflow.
pub fn code_to_index(code: &str) -> Option<i64> {
    if code.is_empty() {
        return None;
    }
    code.chars().try_fold(0i64, |acc, c| {
        let digit = digit_value(c)?;
        acc.checked_mul(BASE)?.checked_add(digit)
    })
}

/// Inverse of [`code_to_index`]. Only positive indices name a code.
pub fn index_to_code(index: i64) -> Option<String> {
    if index <= 0 {
        return None;
    }
    let mut n = index;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    out.reverse();
    String::from_utf8(out).ok()
}
