use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{DbError, Result};

/// Identifier SQLite uses for a private in-memory database.
pub const MEMORY_TARGET: &str = ":memory:";

/// Where the backing SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Memory,
    File(PathBuf),
}

/// Database configuration
///
/// One config opens exactly one connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// In-memory or on-disk database
    pub target: Target,

    /// How long a statement waits on a locked database file, in milliseconds
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,

    /// Enforce foreign key constraints (`PRAGMA foreign_keys`)
    #[serde(default)]
    pub foreign_keys: bool,
}

impl DatabaseConfig {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            busy_timeout_ms: None,
            foreign_keys: false,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Target::Memory)
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::new(Target::File(path.as_ref().to_path_buf()))
    }

    /// `":memory:"` selects an in-memory database, anything else is a path.
    pub fn from_target(target: &str) -> Self {
        if target == MEMORY_TARGET {
            Self::in_memory()
        } else {
            Self::file(target)
        }
    }

    /// Set busy timeout
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Enable or disable foreign key enforcement
    pub fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    pub fn busy_timeout_duration(&self) -> Option<Duration> {
        self.busy_timeout_ms.map(Duration::from_millis)
    }

    /// Parse from connection string
    ///
    /// Format: `sqlite::memory:` or `sqlite://<path>`
    ///
    /// # Examples
    ///
    /// ```
    /// use roomdb::{DatabaseConfig, Target};
    ///
    /// let config = DatabaseConfig::from_url("sqlite://data/food.db").unwrap();
    /// assert_eq!(config.target, Target::File("data/food.db".into()));
    /// ```
    pub fn from_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("sqlite:")
            .ok_or_else(|| DbError::Config("URL must start with 'sqlite:'".to_string()))?;

        let config = match rest {
            ":memory:" | "//:memory:" => Self::in_memory(),
            path => {
                let path = path.strip_prefix("//").unwrap_or(path);
                if path.is_empty() {
                    return Err(DbError::Config("URL has no database path".to_string()));
                }
                Self::file(path)
            }
        };

        Ok(config)
    }

    /// Parse a JSON document, e.g. `{"target": "memory", "foreign_keys": true}`
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DbError::Config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to connection string
    pub fn to_url(&self) -> String {
        match &self.target {
            Target::Memory => "sqlite::memory:".to_string(),
            Target::File(path) => format!("sqlite://{}", path.display()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Target::File(path) = &self.target {
            if path.as_os_str().is_empty() {
                return Err(DbError::Config("Database path cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.target, Target::Memory);
        assert_eq!(config.busy_timeout_ms, None);
        assert!(!config.foreign_keys);
    }

    #[test]
    fn test_builder_pattern() {
        let config = DatabaseConfig::file("food.db")
            .busy_timeout(Duration::from_secs(2))
            .foreign_keys(true);

        assert_eq!(config.target, Target::File(PathBuf::from("food.db")));
        assert_eq!(config.busy_timeout_duration(), Some(Duration::from_secs(2)));
        assert!(config.foreign_keys);
    }

    #[test]
    fn test_from_target() {
        assert_eq!(DatabaseConfig::from_target(":memory:").target, Target::Memory);
        assert_eq!(
            DatabaseConfig::from_target("/tmp/x.db").target,
            Target::File(PathBuf::from("/tmp/x.db"))
        );
    }

    #[test]
    fn test_from_url() {
        assert_eq!(DatabaseConfig::from_url("sqlite::memory:").unwrap().target, Target::Memory);
        assert_eq!(
            DatabaseConfig::from_url("sqlite://var/food.db").unwrap().target,
            Target::File(PathBuf::from("var/food.db"))
        );
    }

    #[test]
    fn test_invalid_url() {
        assert!(DatabaseConfig::from_url("postgres://db").is_err());
        assert!(DatabaseConfig::from_url("sqlite://").is_err());
    }

    #[test]
    fn test_from_json() {
        let config = DatabaseConfig::from_json(
            r#"{"target": {"file": "food.db"}, "busy_timeout_ms": 250}"#,
        )
        .unwrap();
        assert_eq!(config.target, Target::File(PathBuf::from("food.db")));
        assert_eq!(config.busy_timeout_ms, Some(250));

        let config = DatabaseConfig::from_json(r#"{"target": "memory"}"#).unwrap();
        assert_eq!(config, DatabaseConfig::in_memory());

        assert!(DatabaseConfig::from_json(r#"{"target": {"file": ""}}"#).is_err());
    }

    #[test]
    fn test_to_url_round_trips() {
        let config = DatabaseConfig::file("a/b.db");
        assert_eq!(DatabaseConfig::from_url(&config.to_url()).unwrap(), config);
    }
}
