use thiserror::Error;

/// Failure raised by an extractor when its parsing backend cannot read the content
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid archive: {0}")]
    Archive(String),

    #[error("malformed XML in {part}: {reason}")]
    Xml { part: String, reason: String },

    #[error("failed to parse {format}: {reason}")]
    Parse { format: &'static str, reason: String },

    #[error("{tool} failed: {reason}")]
    Tool { tool: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractionError {
    pub fn parse(format: &'static str, reason: impl ToString) -> Self {
        Self::Parse {
            format,
            reason: reason.to_string(),
        }
    }
}

/// Why a file produced no output without being a failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("unsupported format: {0}")]
    Unsupported(String),

    #[error("file size {size} exceeds limit of {limit} bytes")]
    SizeExceeded { size: u64, limit: u64 },

    #[error("no text left after sanitization")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = ExtractionError::parse("PDF", "trailer not found");
        assert_eq!(err.to_string(), "failed to parse PDF: trailer not found");
    }

    #[test]
    fn test_size_exceeded_message() {
        let reason = SkipReason::SizeExceeded {
            size: 10,
            limit: 5,
        };
        assert_eq!(reason.to_string(), "file size 10 exceeds limit of 5 bytes");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ExtractionError = io.into();
        assert!(matches!(err, ExtractionError::Io(_)));
    }
}
