//! Application configuration loaded from environment variables.

use std::env;

use pinboard_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub prefixes: RoutePrefixes,
}

/// Mount points of the two modules.
///
/// Stored without a trailing slash; the root mount is the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePrefixes {
    pub board: String,
    pub contacts: String,
}

impl Default for RoutePrefixes {
    fn default() -> Self {
        Self {
            board: "/board".to_string(),
            contacts: "/contacts".to_string(),
        }
    }
}

impl RoutePrefixes {
    pub fn new(board: &str, contacts: &str) -> Self {
        Self {
            board: normalize_prefix(board),
            contacts: normalize_prefix(contacts),
        }
    }
}

/// `board/` -> `/board`, `/` -> ``.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
        });

        let defaults = RoutePrefixes::default();
        let prefixes = RoutePrefixes::new(
            &env::var("BOARD_PREFIX").unwrap_or(defaults.board),
            &env::var("CONTACTS_PREFIX").unwrap_or(defaults.contacts),
        );

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            prefixes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_normalized() {
        let prefixes = RoutePrefixes::new("board/", " /address-book ");
        assert_eq!(prefixes.board, "/board");
        assert_eq!(prefixes.contacts, "/address-book");
    }

    #[test]
    fn test_slash_prefix_mounts_at_root() {
        assert_eq!(RoutePrefixes::new("/", "").board, "");
        assert_eq!(RoutePrefixes::new("/", "").contacts, "");
    }
}
