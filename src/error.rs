use thiserror::Error;

/// Main error type for foodgraph
#[derive(Error, Debug)]
pub enum FoodgraphError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output row-stream write errors; fatal, since a partially written
    /// graph file is unusable for bulk import
    #[error("Sink write error: {0}")]
    Sink(#[from] csv::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source record stream errors
    #[error("Source error: {0}")]
    Source(String),
}

/// Convenient Result type using FoodgraphError
pub type Result<T> = std::result::Result<T, FoodgraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FoodgraphError::Config("Test error".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FoodgraphError = io_err.into();
        assert!(matches!(err, FoodgraphError::Io(_)));
    }

    #[test]
    fn test_source_error_display() {
        let err = FoodgraphError::Source("line 3: invalid JSON".to_string());
        assert!(err.to_string().contains("Source error"));
        assert!(err.to_string().contains("line 3"));
    }
}
