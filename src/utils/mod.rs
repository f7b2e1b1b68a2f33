pub mod env;
pub mod log;
pub mod strings;
pub mod timestamp;

pub use env::{env_bool, parse_bool};
pub use log::{ConsoleLogger, LogHandler, LogLevel, Logger, MemoryLogger};
pub use strings::{strcasecmp, strncasecmp};
pub use timestamp::{timestamp_min, Timestamp};
