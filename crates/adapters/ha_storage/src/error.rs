//! Storage adapter error types.

use kasa_helper_domain::error::KasaHelperError;

/// Errors raised while loading the host's registry files.
#[derive(Debug, thiserror::Error)]
pub enum HaStorageError {
    /// A registry file could not be read.
    #[error("failed to read {file}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A registry file is not valid JSON or has an unexpected shape.
    #[error("failed to parse {file}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// The file's `key` does not name the registry it was loaded as.
    #[error("{file} holds store {found:?}, expected {expected:?}")]
    UnexpectedKey {
        file: String,
        expected: &'static str,
        found: String,
    },
}

impl From<HaStorageError> for KasaHelperError {
    fn from(err: HaStorageError) -> Self {
        Self::Registry(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_unexpected_key() {
        let err = HaStorageError::UnexpectedKey {
            file: "core.area_registry".to_string(),
            expected: "core.area_registry",
            found: "core.device_registry".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "core.area_registry holds store \"core.device_registry\", expected \"core.area_registry\""
        );
    }

    #[test]
    fn should_convert_to_registry_error() {
        let err = HaStorageError::Io {
            file: "core.config_entries".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let err: KasaHelperError = err.into();
        assert!(matches!(err, KasaHelperError::Registry(_)));
    }
}
