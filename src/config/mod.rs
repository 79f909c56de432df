mod edits;
mod parser;
mod settings;

pub use edits::*;
pub use parser::*;
pub use settings::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown key {key} on line {line}")]
    UnknownKey { line: usize, key: String },

    #[error("Missing parameter {index} for {key} on line {line}")]
    MissingParam {
        line: usize,
        key: String,
        index: usize,
    },

    #[error("Invalid value \"{value}\" for {key} on line {line}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
}
