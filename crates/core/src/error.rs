use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: String, line: usize, column: usize) -> Self {
        Self {
            file: Some(file),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors that can occur while building a table of contents.
#[derive(Debug, Error)]
pub enum TocError {
    /// IO error while reading input or writing output.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    MarkdownAdapter {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// The configured heading range is empty.
    #[error("Invalid depth range: floor {floor} is greater than ceiling {ceiling}")]
    InvalidDepthRange {
        /// Lowest heading level that is indexed
        floor: u8,
        /// Highest heading level that is indexed
        ceiling: u8,
    },
    /// Options could not be decoded.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    /// JSON serialization of the output stream failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TocError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::MarkdownAdapter {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Create an invalid options error
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions(message.into())
    }

    /// Attaches a file path to parse error locations. Other errors are
    /// returned unchanged.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            Self::MarkdownAdapter { message, location } => Self::MarkdownAdapter {
                message,
                location: SourceLocation::with_file(file.into(), location.line, location.column),
            },
            other => other,
        }
    }
}
