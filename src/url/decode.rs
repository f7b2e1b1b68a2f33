use std::borrow::Cow;

/// Percent-decode `src` into raw bytes.
///
/// Every `%` followed by at least two more bytes consumes those two bytes and
/// emits a single byte. The pair is read leniently, the way `strtoul(.., 16)`
/// reads it: leading whitespace and a sign are accepted, parsing stops at the
/// first non-hex byte, and a pair with no hex digits yields `0x00`. A `%` with
/// fewer than two bytes after it is copied literally.
///
/// The result is not required to be UTF-8; use [`urldecode_lossy`] for text.
pub fn urldecode(src: &str) -> Cow<'_, [u8]> {
    let bytes = src.as_bytes();
    if !bytes.contains(&b'%') {
        return Cow::Borrowed(bytes);
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            out.push(lenient_hex_byte([bytes[i + 1], bytes[i + 2]]));
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Cow::Owned(out)
}

/// [`urldecode`] for display, with bytes that are not UTF-8 shown as U+FFFD.
pub fn urldecode_lossy(src: &str) -> Cow<'_, str> {
    match urldecode(src) {
        Cow::Borrowed(_) => Cow::Borrowed(src),
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

/// C `isspace` in the default locale, which unlike
/// [`u8::is_ascii_whitespace`] includes vertical tab.
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn lenient_hex_byte(pair: [u8; 2]) -> u8 {
    let mut rest = &pair[..];

    while let [first, tail @ ..] = rest {
        if !is_c_space(*first) {
            break;
        }
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    let mut value: u8 = 0;
    for &b in rest {
        let digit = match (b as char).to_digit(16) {
            Some(d) => d as u8,
            None => break,
        };
        value = value.wrapping_mul(16).wrapping_add(digit);
    }

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}
