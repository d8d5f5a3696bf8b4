//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while parsing or decoding a flamebearer payload
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("Level {level} has {len} values, which is not a multiple of the {stride}-value node stride")]
    InvalidStride { level: usize, len: usize, stride: usize },

    #[error("Negative tick value {value} at level {level}, index {index}")]
    NegativeValue { level: usize, index: usize, value: i64 },

    #[error("Name index {index} at level {level} is out of range ({names} names)")]
    NameIndexOutOfRange { level: usize, index: i64, names: usize },

    #[error("Tick values overflow at level {level}, index {index}")]
    TickOverflow { level: usize, index: usize },
}

/// Errors that can occur while rendering or projecting a viewport
#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("Zoomed node at level {zoom_level} is above the focused node at level {focus_level}")]
    ZoomAboveFocus { zoom_level: usize, focus_level: usize },

    #[error("Canvas width must be positive and finite, got {0}")]
    InvalidCanvasWidth(f64),

    #[error("Node ({level}, {j}) is not part of this tree")]
    NodeNotInTree { level: usize, j: usize },
}

/// Errors that can occur while building a flamebearer from collapsed stacks
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Malformed collapsed stack on line {line}: {content}")]
    MalformedLine { line: usize, content: String },

    #[error("Empty stack data")]
    EmptyStacks,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading render configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
