use std::io::{self, Write};

use super::{quote_data, terminated_str};
use crate::error::{error_text, QuoteError};

/// Size of the fixed buffer used for diagnostic printing.
pub const PRINT_BUFFER_SIZE: usize = 256;

const TRUNCATED_SUFFIX: &str = "... (truncated)";

/// Write the quoted form of `bytes` to `out`, truncated to fit a
/// [`PRINT_BUFFER_SIZE`] buffer. Truncated output is followed by
/// `"... (truncated)"`.
pub fn fprint_data<W: Write + ?Sized>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    let mut buf = [0u8; PRINT_BUFFER_SIZE];
    match quote_data(&mut buf, bytes) {
        Ok(_) => out.write_all(terminated_str(&buf).as_bytes()),
        Err(QuoteError::Overflow) => {
            out.write_all(terminated_str(&buf).as_bytes())?;
            out.write_all(TRUNCATED_SUFFIX.as_bytes())
        }
        Err(err) => Err(io::Error::new(
            io::ErrorKind::Other,
            format!("quote_data: {}", error_text(err.code())),
        )),
    }
}

/// [`fprint_data`] to stdout.
pub fn print_data(bytes: &[u8]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    fprint_data(&mut lock, bytes)?;
    lock.flush()
}
