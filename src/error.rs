use thiserror::Error;

pub const OK: i32 = 0;
pub const EOS: i32 = -1;
pub const ERR: i32 = -2;
pub const OVERFLOW: i32 = -3;
pub const UNDERFLOW: i32 = -4;
pub const STATE_ERR: i32 = -5;
pub const ARG_ERR: i32 = -6;
pub const TIMEOUT: i32 = -7;
pub const INTR: i32 = -8;
pub const INPROGRESS: i32 = -9;
pub const OUT_OF_MEMORY: i32 = -10;
pub const ABORTED: i32 = -11;

/// Errors produced while quoting bytes into a destination buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// The destination is too small for the encoded output. Recoverable by
    /// growing the destination and quoting again.
    #[error("destination buffer overflow")]
    Overflow,

    /// The growable destination refused to grow.
    #[error("failed to grow destination: {0}")]
    Grow(String),

    /// Any other failure, carried as a toolkit error code.
    #[error("quoting failed: {}", code_text(.0))]
    Code(i32),
}

impl QuoteError {
    /// Numeric toolkit code for this error.
    pub fn code(&self) -> i32 {
        match self {
            QuoteError::Overflow => OVERFLOW,
            QuoteError::Grow(_) => OUT_OF_MEMORY,
            QuoteError::Code(code) => *code,
        }
    }
}

fn code_text(code: &i32) -> &'static str {
    error_text(*code)
}

/// Maps a toolkit error code to its symbolic name.
pub fn error_text(code: i32) -> &'static str {
    match code {
        OK => "<ok>",
        EOS => "PN_EOS",
        ERR => "PN_ERR",
        OVERFLOW => "PN_OVERFLOW",
        UNDERFLOW => "PN_UNDERFLOW",
        STATE_ERR => "PN_STATE_ERR",
        ARG_ERR => "PN_ARG_ERR",
        TIMEOUT => "PN_TIMEOUT",
        INTR => "PN_INTR",
        INPROGRESS => "PN_INPROGRESS",
        OUT_OF_MEMORY => "PN_OUT_OF_MEMORY",
        ABORTED => "PN_ABORTED",
        _ => "<unknown>",
    }
}
