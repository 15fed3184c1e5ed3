//! Input decoding helpers.

use std::borrow::Cow;

/// Decode raw input bytes to a string.
///
/// 1. UTF-8 first (a BOM is handled by encoding_rs)
/// 2. If malformed, the `<meta charset>` declared in the first bytes
/// 3. Windows-1252 otherwise, the usual encoding of legacy clipboard HTML
///
/// ```
/// use panelmark::decode_text;
///
/// assert_eq!(decode_text("すごい".as_bytes()), "すごい");
/// assert_eq!(decode_text(b"caf\xe9"), "café");
/// ```
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    if let Some(label) = extract_meta_charset(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(label)
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find a `charset=` declaration within the first 1024 bytes.
fn extract_meta_charset(bytes: &[u8]) -> Option<&[u8]> {
    let prefix = &bytes[..bytes.len().min(1024)];
    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let rest = &prefix[pos + 8..];
    let rest = match rest.first() {
        Some(b'"') | Some(b'\'') => &rest[1..],
        _ => rest,
    };
    let end = rest
        .iter()
        .position(|b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}
