//! Rendering of arbitrary bytes as printable, bounded text.
//!
//! Printable ASCII is copied as-is; every other byte becomes a four character
//! `\xHH` escape. Output is always NUL-terminated so it can be handed to code
//! expecting C-style strings.

mod growable;
mod print;

pub use growable::{quote, GrowableBuffer, QuoteString};
pub use print::{fprint_data, print_data, PRINT_BUFFER_SIZE};

use std::borrow::Cow;

use crate::error::QuoteError;

/// Length of a `\xHH` escape.
const ESCAPE_LEN: usize = 4;

/// Matches C-locale `isprint`: space through tilde.
pub fn is_printable(b: u8) -> bool {
    matches!(b, 0x20..=0x7e)
}

/// Quote `src` into the fixed-capacity `dst`, returning the number of bytes
/// written excluding the terminating NUL.
///
/// A plain byte is only written while at least one more byte remains for the
/// terminator; an escape needs room for its four bytes plus the terminator.
/// When `src` does not fit, the output written so far is cut back to the
/// start of the last emitted unit (so a partial escape never remains), that
/// position is NUL-terminated and [`QuoteError::Overflow`] is returned.
pub fn quote_data(dst: &mut [u8], src: &[u8]) -> Result<usize, QuoteError> {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let capacity = dst.len();
    let mut idx = 0;
    // Start of the most recently emitted unit (plain byte or escape).
    let mut last_unit = 0;

    for &b in src {
        let needed = if is_printable(b) { 1 } else { ESCAPE_LEN };
        if idx + needed >= capacity {
            if idx > 0 {
                dst[last_unit] = 0;
            }
            return Err(QuoteError::Overflow);
        }

        last_unit = idx;
        if needed == 1 {
            dst[idx] = b;
        } else {
            dst[idx] = b'\\';
            dst[idx + 1] = b'x';
            dst[idx + 2] = HEX[(b >> 4) as usize];
            dst[idx + 3] = HEX[(b & 0x0F) as usize];
        }
        idx += needed;
    }

    // Empty input into an empty buffer leaves no room for the terminator.
    if idx >= capacity {
        return Err(QuoteError::Overflow);
    }

    dst[idx] = 0;
    Ok(idx)
}

/// View the NUL-terminated prefix of a quote buffer as text.
///
/// Quoted output is pure ASCII and always borrows. Bytes that are not UTF-8
/// (a buffer that was not filled by [`quote_data`]) show up as U+FFFD.
pub fn terminated_str(buf: &[u8]) -> Cow<'_, str> {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end])
}
