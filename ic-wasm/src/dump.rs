use std::fmt::Write;

/// Separator placed between two rendered bytes.
pub const SEPARATOR: char = '\\';

/// Renders every byte as two lowercase hex digits, joined by a single backslash.
///
/// A non-empty input of `n` bytes yields `3n - 1` characters; an empty input yields an empty
/// string.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() * 3).saturating_sub(1));
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "{:02x}", byte);
    }
    out
}
