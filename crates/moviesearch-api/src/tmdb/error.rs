//! Catalog error taxonomy.

use thiserror::Error;

/// Failure of a catalog search.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum CatalogError {
    /// No API token was configured; raised before any network attempt.
    #[error("TMDB API token is not configured (set TMDB_API_TOKEN)")]
    Configuration,

    /// Network failure, non-2xx status, or a body that does not match the schema.
    #[error("TMDB request failed: {reason}")]
    Fetch {
        /// Human-readable failure chain, for logs only.
        reason: String,
    },
}

impl CatalogError {
    /// Wraps an `anyhow` error chain as a fetch failure.
    pub(crate) fn fetch(err: &anyhow::Error) -> Self {
        Self::Fetch {
            reason: format!("{err:#}"),
        }
    }

    /// Returns `true` for the missing-credential case.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn test_fetch_keeps_context_chain() {
        // Arrange
        let inner: anyhow::Result<()> = Err(anyhow::anyhow!("connection refused"));
        let err = inner.context("request failed: search/movie").unwrap_err();

        // Act
        let catalog_err = CatalogError::fetch(&err);

        // Assert
        let message = catalog_err.to_string();
        assert!(message.contains("request failed: search/movie"));
        assert!(message.contains("connection refused"));
        assert!(!catalog_err.is_configuration());
    }

    #[test]
    fn test_configuration_message_names_env_var() {
        // Arrange & Act
        let message = CatalogError::Configuration.to_string();

        // Assert
        assert!(message.contains("TMDB_API_TOKEN"));
        assert!(CatalogError::Configuration.is_configuration());
    }
}
