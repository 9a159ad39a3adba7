//! Process configuration

/// Store process configuration
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "./docsite.db".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from environment variables, falling back to defaults
    #[allow(dead_code)]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_path: std::env::var("DOCSITE_DATABASE_PATH")
                .unwrap_or(defaults.database_path),
            log_level: std::env::var("DOCSITE_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.database_path, "./docsite.db");
        assert_eq!(config.log_level, "info");
    }
}
