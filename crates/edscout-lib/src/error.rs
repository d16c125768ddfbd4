use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the EDScout library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the journal directory does not exist.
    #[error("journal directory not found at {path}")]
    JournalDirNotFound { path: PathBuf },

    /// Raised when the journal directory contains no `Journal.*.log` files.
    #[error("no journal files found in {path}")]
    NoJournalFiles { path: PathBuf },

    /// Raised when `Cargo.json` is missing from the journal directory.
    #[error("cargo file not found at {path}")]
    CargoFileNotFound { path: PathBuf },

    /// Raised when the newest journal file holds no location event.
    #[error("no location event found in {path}; jump to a system or pass --system")]
    LocationNotFound { path: PathBuf },

    /// Raised when no user home directory could be resolved for the default
    /// journal path.
    #[error("failed to resolve the user home directory for the journal path")]
    HomeDirUnavailable,

    /// Raised when a system name is not known to the remote lookup service.
    #[error("unknown system name: {name}")]
    UnknownSystem { name: String },

    /// Raised when a material name is not in the commodity registry.
    #[error("unknown material: {name}{}", format_suggestions(.suggestions))]
    UnknownMaterial {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a ring type string cannot be parsed.
    #[error("invalid ring type: {value} (expected icy, rocky, metallic or metal-rich)")]
    InvalidRingType { value: String },

    /// Raised when a pad size string cannot be parsed.
    #[error("invalid pad size: {value} (expected S, M or L)")]
    InvalidPadSize { value: String },

    /// Raised when a remote response does not have the expected shape.
    #[error("unexpected response from lookup service: {message}")]
    UnexpectedResponse { message: String },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
