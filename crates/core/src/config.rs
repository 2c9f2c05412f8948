//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! store and services. Library code never reads environment variables itself;
//! the binaries read them and hand the raw values to the helpers below.

use crate::constants::DEFAULT_DATABASE_PATH;
use crate::{OdontoError, OdontoResult};
use odonto_types::Color;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_path: PathBuf,
    default_color: Color,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The database path must name a file, not a directory.
    pub fn new(database_path: PathBuf, default_color: Color) -> OdontoResult<Self> {
        if database_path.as_os_str().is_empty() {
            return Err(OdontoError::InvalidInput(
                "database path cannot be empty".into(),
            ));
        }
        if database_path.is_dir() {
            return Err(OdontoError::InvalidInput(format!(
                "database path {} is a directory",
                database_path.display()
            )));
        }

        Ok(Self {
            database_path,
            default_color,
        })
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Color pre-selected in the chart toolbar when an editing session starts.
    pub fn default_color(&self) -> Color {
        self.default_color
    }
}

/// Resolve the database path from an optional environment value.
///
/// `None` or a blank value falls back to [`DEFAULT_DATABASE_PATH`].
pub fn database_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
}

/// Parse the toolbar's default color from an optional environment value.
///
/// Unlike chart payloads, configuration is strict: an unknown color is a
/// startup error rather than a silent fallback.
pub fn default_color_from_env_value(value: Option<String>) -> OdontoResult<Color> {
    let value = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(Color::default()),
        Some(v) => v
            .parse::<Color>()
            .map_err(|e| OdontoError::InvalidInput(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn blank_database_path_uses_default() {
        assert_eq!(
            database_path_from_env_value(None),
            PathBuf::from(DEFAULT_DATABASE_PATH)
        );
        assert_eq!(
            database_path_from_env_value(Some("   ".into())),
            PathBuf::from(DEFAULT_DATABASE_PATH)
        );
        assert_eq!(
            database_path_from_env_value(Some("/tmp/x.sqlite".into())),
            PathBuf::from("/tmp/x.sqlite")
        );
    }

    #[test]
    fn default_color_is_strict() {
        assert_eq!(default_color_from_env_value(None).unwrap(), Color::Blue);
        assert_eq!(
            default_color_from_env_value(Some(" RED ".into())).unwrap(),
            Color::Red
        );
        assert!(matches!(
            default_color_from_env_value(Some("green".into())),
            Err(OdontoError::InvalidInput(_))
        ));
    }

    #[test]
    fn config_rejects_directory_as_database_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = CoreConfig::new(temp_dir.path().to_path_buf(), Color::Blue).unwrap_err();
        assert!(matches!(err, OdontoError::InvalidInput(_)));

        let cfg = CoreConfig::new(temp_dir.path().join("clinic.sqlite"), Color::Red).unwrap();
        assert_eq!(cfg.default_color(), Color::Red);
    }
}
