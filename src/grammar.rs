//! Grammar helpers for media type tokens.
//!
//! Based on the RFC 1521 and RFC 2045 token definitions. The scanners work on
//! bytes and return positions; every position they return sits on an ASCII
//! boundary, so callers may slice the original `&str` with it.

/// Reports whether the character is in 'tspecials' as defined by RFC 1521 and RFC 2045.
///
/// tspecials := "(" / ")" / "<" / ">" / "@" / "," / ";" / ":" / "\" / <">
///              / "/" / "[" / "]" / "?" / "="
pub fn is_tspecial(c: char) -> bool {
    matches!(
        c,
        '(' | ')' | '<' | '>' | '@' | ',' | ';' | ':' | '\\' | '"' | '/' | '[' | ']' | '?' | '='
    )
}

/// Reports whether the character is in 'token' as defined by RFC 1521 and RFC 2045.
///
/// token := 1*<any (US-ASCII) CHAR except SPACE, CTLs, or tspecials>
///
/// This is exactly the set `[a-zA-Z0-9-!#$%&'*+.^_`{|}~]`.
pub fn is_token_char(c: char) -> bool {
    c > '\x20' && c < '\x7f' && !is_tspecial(c)
}

/// Byte flavour of [`is_token_char`]. Bytes of multi-byte UTF-8 sequences are never token bytes.
pub fn is_token_byte(b: u8) -> bool {
    b.is_ascii() && is_token_char(b as char)
}

/// Reports whether the string is a valid 'token' as defined by RFC 1521 and RFC 2045.
///
/// A token must be non-empty and contain only valid token characters.
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

/// Whitespace accepted after a parameter separator: space, `\t`, `\n`, `\x0B`, `\x0C` and `\r`.
pub fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// Returns the end of the longest token run starting at `start`.
///
/// Equal to `start` when no token byte is found there.
pub fn token_end(input: &[u8], start: usize) -> usize {
    scan_while(input, start, is_token_byte)
}

/// Returns the end of the whitespace run starting at `start`.
pub fn whitespace_end(input: &[u8], start: usize) -> usize {
    scan_while(input, start, is_whitespace_byte)
}

/// Matches `"` *non-quote `"` at `start`.
///
/// Returns the position just past the closing quote, or `None` when `start`
/// does not hold a quote or the string is unterminated. Backslashes are not
/// escapes.
pub fn quoted_end(input: &[u8], start: usize) -> Option<usize> {
    if input.get(start) != Some(&b'"') {
        return None;
    }
    let body = input.get(start + 1..)?;
    body.iter()
        .position(|&b| b == b'"')
        .map(|close| start + 1 + close + 1)
}

fn scan_while(input: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    let run = input
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|&&b| pred(b)).count());
    start + run
}
