use std::{env, time::Duration};

use roster_core::query::PageSize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (default: "sqlite://roster.db")
    pub database_url: String,
    /// Upper bound on concurrently checked-out connections (default: 25)
    pub max_connections: u32,
    /// Seconds a checkout may wait for a free connection (default: 30)
    pub acquire_timeout_seconds: u64,
    /// Users per page when listing (default: 10)
    pub page_size: PageSize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - SQLite connection URL (default: "sqlite://roster.db")
    /// - `MAX_CONNECTIONS` - Pool size (default: 25)
    /// - `ACQUIRE_TIMEOUT_SECONDS` - Pool checkout wait (default: 30)
    /// - `PAGE_SIZE` - Users per page (default: 10)
    ///
    /// Unparseable or zero values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://roster.db".to_string()),
            max_connections: env::var("MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&v| v > 0)
                .unwrap_or(25),
            acquire_timeout_seconds: env::var("ACQUIRE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .and_then(PageSize::new)
                .unwrap_or_default(),
        }
    }

    /// Get the pool checkout wait as a Duration.
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_timeout_conversion() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 5,
            acquire_timeout_seconds: 12,
            page_size: PageSize::DEFAULT,
        };

        assert_eq!(config.acquire_timeout(), Duration::from_secs(12));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("DATABASE_URL");
        env::remove_var("MAX_CONNECTIONS");
        env::remove_var("ACQUIRE_TIMEOUT_SECONDS");
        env::remove_var("PAGE_SIZE");

        let config = Config::from_env();

        assert_eq!(config.database_url, "sqlite://roster.db");
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.acquire_timeout_seconds, 30);
        assert_eq!(config.page_size.get(), 10);
    }
}
