//! Typed view over the flat `settings` table.

use std::collections::HashMap;

use crate::errors::{AppError, AppResult};

pub const KEY_USERNAME: &str = "username";
pub const KEY_PASSWORD: &str = "password";
pub const KEY_HOST: &str = "host";
pub const KEY_USE_TLS: &str = "use_tls";
pub const KEY_EMPLOYEE_ID: &str = "employee_id";
pub const KEY_DEFAULT_DEPARTMENT: &str = "default_department";

/// Connection and identity data the remote protocol needs. Stored as flat
/// key/value rows and materialized into this struct on load.
#[derive(Debug, Clone)]
pub struct Settings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub use_tls: bool,
    pub employee_id: i64,
    pub default_department: i64,
}

impl Settings {
    /// Build the typed view from raw key/value pairs. Missing keys are a
    /// configuration error: `init` seeds all of them.
    pub fn from_pairs(pairs: &HashMap<String, String>) -> AppResult<Self> {
        let get = |key: &str| -> AppResult<&String> {
            pairs
                .get(key)
                .ok_or_else(|| AppError::Config(format!("missing setting '{}', run 'init' first", key)))
        };

        let employee_id = get(KEY_EMPLOYEE_ID)?
            .parse::<i64>()
            .map_err(|_| AppError::Config("employee_id must be an integer".to_string()))?;
        let default_department = get(KEY_DEFAULT_DEPARTMENT)?
            .parse::<i64>()
            .map_err(|_| AppError::Config("default_department must be an integer".to_string()))?;

        Ok(Self {
            username: get(KEY_USERNAME)?.clone(),
            password: get(KEY_PASSWORD)?.clone(),
            host: get(KEY_HOST)?.clone(),
            use_tls: matches!(get(KEY_USE_TLS)?.as_str(), "yes" | "true" | "1"),
            employee_id,
            default_department,
        })
    }
}
