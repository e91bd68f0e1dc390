//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect duplicate seed users
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new("listener.bind_address", "not a socket address"));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::new("listener.max_body_bytes", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.session.cookie_name.trim().is_empty() {
        errors.push(ValidationError::new("session.cookie_name", "must not be empty"));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new("observability.metrics_address", "not a socket address"));
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for (i, user) in config.seed.users.iter().enumerate() {
        if user.id.trim().is_empty() {
            errors.push(ValidationError::new(format!("seed.users[{i}].id"), "must not be empty"));
        } else if !ids.insert(user.id.as_str()) {
            errors.push(ValidationError::new(format!("seed.users[{i}].id"), format!("duplicate id `{}`", user.id)));
        }
        if user.username.trim().is_empty() {
            errors.push(ValidationError::new(format!("seed.users[{i}].username"), "must not be empty"));
        } else if !names.insert(user.username.as_str()) {
            errors.push(ValidationError::new(
                format!("seed.users[{i}].username"),
                format!("duplicate username `{}`", user.username),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
