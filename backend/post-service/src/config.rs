//! Configuration management for the post service
//!
//! Loads configuration from environment variables with development-friendly
//! defaults.
use db_pool::DbConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service behavior settings
    pub service: ServiceConfig,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// Service behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// How unrecognized display-picture kinds are handled
    pub picture_kind_policy: PictureKindPolicy,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Policy for `change_display_picture` calls carrying a kind other than
/// "profile" or "cover".
///
/// The lenient mode matches the historical behavior: the post is still
/// created, the user record is left untouched, and no error is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PictureKindPolicy {
    /// Silently ignore unrecognized kinds
    Lenient,
    /// Reject unrecognized kinds with a validation error
    Strict,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let picture_kind_policy =
            match std::env::var("PICTURE_KIND_POLICY").as_deref().unwrap_or("lenient") {
                "lenient" => PictureKindPolicy::Lenient,
                "strict" => PictureKindPolicy::Strict,
                other => {
                    return Err(format!(
                        "PICTURE_KIND_POLICY must be 'lenient' or 'strict', got '{}'",
                        other
                    ))
                }
            };

        Ok(Config {
            service: ServiceConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                picture_kind_policy,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/ripple".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(10),
            },
        })
    }

    /// Pool configuration for `db_pool::create_pool`
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            service_name: "post-service".to_string(),
            database_url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            ..DbConfig::default()
        }
    }
}
