//! Connection URL decomposition.

mod components;
mod decode;

pub use components::{parse_url, UrlComponents};
pub use decode::{urldecode, urldecode_lossy};
