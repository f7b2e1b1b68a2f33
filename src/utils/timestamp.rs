/// Milliseconds since the epoch. Zero means "not set".
pub type Timestamp = i64;

/// The earlier of two deadlines, ignoring unset (zero) ones.
pub fn timestamp_min(a: Timestamp, b: Timestamp) -> Timestamp {
    match (a, b) {
        (0, b) => b,
        (a, 0) => a,
        (a, b) => a.min(b),
    }
}
