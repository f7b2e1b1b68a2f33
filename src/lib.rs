//! Text utilities for a messaging toolkit: bounded quoting of binary data for
//! diagnostics and decomposition of connection URLs.

pub mod error;
pub mod quote;
pub mod trace;
pub mod url;
pub mod utils;

pub use error::{error_text, QuoteError};
pub use quote::{quote, quote_data, GrowableBuffer, QuoteString};
pub use trace::{TraceContext, Tracer};
pub use url::{parse_url, UrlComponents};
