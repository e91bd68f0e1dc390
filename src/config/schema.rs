//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the notes worker.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Session lookup settings.
    pub session: SessionConfig,

    /// First-request user seeding.
    pub seed: SeedConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Session cookie settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie holding the session's user id.
    pub cookie_name: String,

    /// User id assumed when no session cookie is present.
    pub fallback_user_id: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_string(),
            fallback_user_id: None,
        }
    }
}

/// What the seeder does once it wins the gate.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Seed only when the users table is empty.
    #[default]
    IfEmpty,
    /// Clear the users table and seed unconditionally.
    Replace,
}

/// A user inserted by the seeder.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SeedUser {
    pub id: String,
    pub username: String,
}

impl SeedUser {
    fn new(id: &str, username: &str) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
        }
    }
}

/// User seeding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Run the seeder on the first request.
    pub enabled: bool,

    pub policy: SeedPolicy,

    pub users: Vec<SeedUser>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            policy: SeedPolicy::IfEmpty,
            users: vec![
                SeedUser::new("u_123", "John"),
                SeedUser::new("u_456", "Sue"),
                SeedUser::new("u_789", "Thandi"),
            ],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "notes_worker=debug,tower_http=debug".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.session.cookie_name, "session");
        assert!(config.seed.enabled);
        assert_eq!(config.seed.policy, SeedPolicy::IfEmpty);
        assert_eq!(config.seed.users.len(), 3);
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [session]
            fallback_user_id = "u_123"

            [seed]
            policy = "replace"
            users = [{ id = "u_1", username = "Ada" }]
            "#,
        )
        .unwrap();

        assert_eq!(config.session.cookie_name, "session");
        assert_eq!(config.session.fallback_user_id.as_deref(), Some("u_123"));
        assert_eq!(config.seed.policy, SeedPolicy::Replace);
        assert_eq!(config.seed.users, vec![SeedUser::new("u_1", "Ada")]);
        assert!(config.seed.enabled);
    }
}
