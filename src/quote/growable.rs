use std::fmt;

use super::quote_data;
use crate::error::QuoteError;

/// Smallest capacity ever requested on overflow.
const MIN_GROW: usize = 16;

/// A destination whose capacity can be increased on demand, tracked separately
/// from the size of its logical content.
///
/// Implementations must keep `size() <= capacity()` and must never shrink in
/// [`grow`](GrowableBuffer::grow).
pub trait GrowableBuffer {
    fn size(&self) -> usize;

    fn capacity(&self) -> usize;

    /// Writable storage from the logical end to the current capacity.
    fn tail_mut(&mut self) -> &mut [u8];

    /// Ensure the capacity is at least `min_capacity`.
    fn grow(&mut self, min_capacity: usize) -> Result<(), QuoteError>;

    /// Set the logical size. Fails if `size` exceeds the capacity.
    fn resize(&mut self, size: usize) -> Result<(), QuoteError>;
}

/// Append the quoted form of `src` to `dst`, growing it until the output fits.
///
/// Each overflow doubles the total capacity (never requesting less than 16
/// bytes) and quotes again from scratch; partial output from a failed attempt
/// is simply overwritten. Output never exceeds `4 * src.len() + 1` bytes, so
/// the loop ends after a logarithmic number of attempts.
///
/// A buffer whose `grow` reports success without adding capacity is an error,
/// not a reason to retry forever.
pub fn quote<B: GrowableBuffer + ?Sized>(dst: &mut B, src: &[u8]) -> Result<(), QuoteError> {
    loop {
        let size = dst.size();
        let capacity = dst.capacity();

        match quote_data(dst.tail_mut(), src) {
            Ok(written) => return dst.resize(size + written),
            Err(QuoteError::Overflow) => {
                dst.grow(MIN_GROW.max(2 * capacity))?;
                if dst.capacity() <= capacity {
                    return Err(QuoteError::Grow(format!(
                        "capacity stayed at {} after grow",
                        dst.capacity()
                    )));
                }
            }
            Err(err) => return Err(err),
        }
    }
}

/// Heap-backed growable text buffer for quoted output.
///
/// Storage beyond the logical size is kept zeroed-or-stale scratch space that
/// [`quote`] writes into; only `[..size]` is content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteString {
    buf: Vec<u8>,
    size: usize,
    limit: Option<usize>,
}

impl QuoteString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity],
            size: 0,
            limit: None,
        }
    }

    /// A buffer that refuses to grow past `limit` bytes of capacity.
    pub fn with_limit(capacity: usize, limit: usize) -> Self {
        Self {
            buf: vec![0u8; capacity.min(limit)],
            size: 0,
            limit: Some(limit),
        }
    }

    /// Append text verbatim (no quoting).
    pub fn push_str(&mut self, s: &str) -> Result<(), QuoteError> {
        let end = self.size + s.len();
        if end > self.buf.len() {
            self.grow(end)?;
        }
        self.buf[self.size..end].copy_from_slice(s.as_bytes());
        self.size = end;
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.size]
    }

    pub fn as_str(&self) -> &str {
        valid_prefix(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.size = 0;
    }

    pub fn into_string(self) -> String {
        self.as_str().to_owned()
    }
}

// Content only ever comes from `push_str` or quoted ASCII, so it is UTF-8.
fn valid_prefix(bytes: &[u8]) -> &str {
    match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            debug_assert!(false, "quote buffer holds invalid UTF-8: {}", e);
            let valid = &bytes[..e.valid_up_to()];
            std::str::from_utf8(valid).unwrap_or_default()
        }
    }
}

impl GrowableBuffer for QuoteString {
    fn size(&self) -> usize {
        self.size
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn tail_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.size..]
    }

    fn grow(&mut self, min_capacity: usize) -> Result<(), QuoteError> {
        if min_capacity <= self.buf.len() {
            return Ok(());
        }
        if let Some(limit) = self.limit {
            if min_capacity > limit {
                return Err(QuoteError::Grow(format!(
                    "requested capacity {} exceeds limit {}",
                    min_capacity, limit
                )));
            }
        }

        let additional = min_capacity - self.buf.len();
        self.buf
            .try_reserve_exact(additional)
            .map_err(|e| QuoteError::Grow(e.to_string()))?;
        self.buf.resize(min_capacity, 0);
        Ok(())
    }

    fn resize(&mut self, size: usize) -> Result<(), QuoteError> {
        if size > self.buf.len() {
            return Err(QuoteError::Code(crate::error::ARG_ERR));
        }
        self.size = size;
        Ok(())
    }
}

impl fmt::Display for QuoteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
