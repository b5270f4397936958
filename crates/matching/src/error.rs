use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad mode, zero pool size, etc.).
    ConfigValidation(String),
    /// Edit operation weight below zero.
    InvalidWeight { operation: &'static str, value: i64 },
    /// Fuzzy threshold negative or not a number.
    InvalidThreshold(f64),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidWeight { operation, value } => {
                write!(f, "{operation} weight must be non-negative, got {value}")
            }
            Self::InvalidThreshold(value) => {
                write!(f, "fuzzy threshold must be a non-negative number, got {value}")
            }
        }
    }
}

impl std::error::Error for MatchError {}
