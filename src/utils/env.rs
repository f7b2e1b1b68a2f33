use super::strings::strcasecmp;

const TRUE_VALUES: [&str; 4] = ["true", "1", "yes", "on"];

/// Interpret a flag value: `true`, `1`, `yes` and `on` (any case) are true,
/// anything else is false.
pub fn parse_bool(value: &str) -> bool {
    TRUE_VALUES.iter().any(|t| strcasecmp(value, t) == 0)
}

/// Whether the environment variable `name` is set to a true flag value.
pub fn env_bool(name: &str) -> bool {
    std::env::var(name).map(|v| parse_bool(&v)).unwrap_or(false)
}
