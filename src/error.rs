//! Error types for sphere and ring sampling

use thiserror::Error;

/// Errors that can occur while configuring or seeding a sampler
///
/// The relaxation itself never fails; only configuration and explicit
/// site layouts are validated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// An explicit site layout does not match the configuration
    #[error("invalid site layout: {0}")]
    InvalidSites(String),
    /// The sampler holds no sites yet
    #[error("sampler has not produced any sites yet")]
    NotSampled,
}

/// Result type alias for sampler operations
pub type Result<T> = std::result::Result<T, SamplerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SamplerError::InvalidConfig("site count must be >= 1".into());
        assert_eq!(err.to_string(), "invalid configuration: site count must be >= 1");

        let err = SamplerError::InvalidSites("expected 2 sites, got 3".into());
        assert_eq!(err.to_string(), "invalid site layout: expected 2 sites, got 3");

        assert_eq!(
            SamplerError::NotSampled.to_string(),
            "sampler has not produced any sites yet"
        );
    }
}
