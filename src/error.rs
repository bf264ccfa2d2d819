use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Boxed underlying cause kept for `--debug` output
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Broad category of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed configuration documents
    Config,
    /// Bad command-line input or an unmapped month/day
    Validation,
    /// Transport, HTTP or GraphQL failure talking to a remote service
    Remote,
    /// Local file handling
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "configuration",
            ErrorKind::Validation => "validation",
            ErrorKind::Remote => "remote service",
            ErrorKind::Io => "io",
        };
        f.write_str(name)
    }
}

/// Pulselog error: a kind, the short message shown to the user, and an
/// optional cause that is only printed in debug mode.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct PulseError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl PulseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Remote, message)
    }

    /// Attach the underlying cause
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text printed by `main` before exiting.
    ///
    /// Without debug only the short corrective message is shown. With debug
    /// the kind, every cause in the chain and the raw `Debug` form follow.
    pub fn render(&self, debug: bool) -> String {
        if !debug {
            return format!("Error: {}", self.message());
        }

        let mut out = format!("Error ({} error): {}", self.kind(), self.message());
        let mut cause = StdError::source(self);
        if cause.is_some() {
            out.push_str("\n\nCaused by:");
        }
        let mut depth = 0;
        while let Some(err) = cause {
            out.push_str(&format!("\n    {}: {}", depth, err));
            depth += 1;
            cause = err.source();
        }
        out.push_str(&format!("\n\n{:#?}", self));
        out
    }
}

impl From<std::io::Error> for PulseError {
    fn from(err: std::io::Error) -> Self {
        PulseError::new(ErrorKind::Io, format!("IO error: {}", err)).with_source(err)
    }
}

impl From<toml::de::Error> for PulseError {
    fn from(err: toml::de::Error) -> Self {
        PulseError::config(format!("TOML parsing error: {}", err.message())).with_source(err)
    }
}

impl From<serde_json::Error> for PulseError {
    fn from(err: serde_json::Error) -> Self {
        PulseError::new(ErrorKind::Io, format!("JSON error: {}", err)).with_source(err)
    }
}

/// Result type for pulselog operations
pub type Result<T> = std::result::Result<T, PulseError>;
