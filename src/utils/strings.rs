//! ASCII case-insensitive comparison.
//!
//! Results follow the C convention: zero when equal, otherwise the signed
//! difference of the first mismatching lowercased bytes.

fn lower(b: u8) -> i32 {
    b.to_ascii_lowercase() as i32
}

/// Compare `a` against `b` ignoring ASCII case.
///
/// Comparison runs over the length of `b`. If `a` is longer, the result is
/// the value of its first extra byte.
pub fn strcasecmp(a: &str, b: &str) -> i32 {
    strcasecmp_bytes(a.as_bytes(), b.as_bytes())
}

pub fn strcasecmp_bytes(a: &[u8], b: &[u8]) -> i32 {
    for (i, &cb) in b.iter().enumerate() {
        let ca = a.get(i).copied().unwrap_or(0);
        let diff = lower(ca) - lower(cb);
        if diff != 0 {
            return diff;
        }
    }
    a.get(b.len()).map_or(0, |&extra| extra as i32)
}

/// Like [`strcasecmp`] but compares at most `len` bytes.
pub fn strncasecmp(a: &str, b: &str, len: usize) -> i32 {
    strncasecmp_bytes(a.as_bytes(), b.as_bytes(), len)
}

pub fn strncasecmp_bytes(a: &[u8], b: &[u8], len: usize) -> i32 {
    let mut remaining = len;
    let mut i = 0;
    while i < b.len() && remaining > 0 {
        let ca = a.get(i).copied().unwrap_or(0);
        let diff = lower(ca) - lower(b[i]);
        if diff != 0 {
            return diff;
        }
        i += 1;
        remaining -= 1;
    }

    if remaining == 0 {
        0
    } else {
        a.get(i).map_or(0, |&extra| extra as i32)
    }
}
