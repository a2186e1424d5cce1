//! Percent-encoding of label and description text.
//!
//! Encoding maps arbitrary text onto the URI-safe alphabet, additionally
//! escaping `=` and `?` so encoded values can never be mistaken for
//! parameter syntax. Decoding is deliberately lenient: only well-formed
//! `%XX` escapes are decoded, anything malformed passes through verbatim.

use std::fmt::Write;

// JS-escape style pass-through set; '=' and '?' are intentionally absent.
fn is_uri_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~' | b'!' | b'*' | b'\'' | b'(' | b')')
}

/// Percent-encodes `text` for use as a query parameter value.
pub fn percent_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if is_uri_safe(byte) {
            out.push(byte as char);
        } else {
            // writing to a String cannot fail
            let _ = write!(out, "%{:02X}", byte);
        }
    }
    out
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|v| v as u8)
}

/// Decodes `%XX` escapes, leaving malformed or truncated escapes untouched.
pub fn percent_decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
