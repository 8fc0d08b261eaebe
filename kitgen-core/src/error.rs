use std::path::PathBuf;

use thiserror::Error;

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A template's required configuration is missing or invalid.
    #[error("{template}: {message}")]
    Config {
        template: String,
        message: String,
    },

    /// A filesystem or stream write failed.
    #[error("failed to write '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The interface model is not something the templates can render.
    #[error("method '{method}': {reason}")]
    Validation { method: String, reason: String },

    /// A generation unit was built without a template or a strategy.
    #[error("empty template or strategy")]
    EmptyTemplateOrStrategy,

    /// A failure attributed to a specific artifact.
    #[error("{artifact}: {source}")]
    Artifact {
        artifact: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error for the named template.
    pub fn config(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for the named method.
    pub fn validation(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Attach the identity of the artifact that failed.
    pub fn in_artifact(self, artifact: impl Into<String>) -> Self {
        Self::Artifact {
            artifact: artifact.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with artifact context peeled off.
    pub fn root(&self) -> &Error {
        match self {
            Self::Artifact { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether this is the "nothing to do" sentinel rather than a real failure.
    pub fn is_sentinel(&self) -> bool {
        matches!(self.root(), Self::EmptyTemplateOrStrategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_context_in_message() {
        let err = Error::config("grpc-server", "protobuf package is required")
            .in_artifact("transport/grpc/server.go");
        assert_eq!(
            err.to_string(),
            "transport/grpc/server.go: grpc-server: protobuf package is required"
        );
        assert!(matches!(err.root(), Error::Config { .. }));
    }

    #[test]
    fn test_sentinel_detection() {
        assert!(Error::EmptyTemplateOrStrategy.is_sentinel());
        assert!(
            Error::EmptyTemplateOrStrategy
                .in_artifact("exchanges.go")
                .is_sentinel()
        );
        assert!(!Error::validation("Add", "bad").is_sentinel());
    }
}
