//! Application configuration
//!
//! Loaded once at startup from a TOML file. A missing file yields the
//! defaults; a few environment variables override individual fields.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::AdminAccount;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::DatabaseConfig;

pub const CONFIG_PATH_ENV: &str = "BOOKING_CONFIG";

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid environment override {name}={value}")]
    Env { name: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub security: SecuritySection,
    pub admin: AdminSection,
    pub logging: LoggingSection,
    pub limits: LimitsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for in-flight work after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            url: defaults.url,
            max_connections: defaults.max_connections,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub faculty_token_ttl_minutes: i64,
    pub admin_token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl Default for SecuritySection {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_issuer: "smartboard-booking".to_string(),
            faculty_token_ttl_minutes: 60,
            admin_token_ttl_hours: 24,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl std::fmt::Debug for SecuritySection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecuritySection")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("faculty_token_ttl_minutes", &self.faculty_token_ttl_minutes)
            .field("admin_token_ttl_hours", &self.admin_token_ttl_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Administrator created when the admins table is empty
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSection {
    pub admin_id: String,
    pub name: String,
    pub position: String,
    pub branch: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl Default for AdminSection {
    fn default() -> Self {
        Self {
            admin_id: "ADMIN001".to_string(),
            name: "System Administrator".to_string(),
            position: "Administrator".to_string(),
            branch: "ADMIN".to_string(),
            email: "admin@college.edu".to_string(),
            phone: "0000000000".to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl std::fmt::Debug for AdminSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSection")
            .field("admin_id", &self.admin_id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    /// `json` or anything else for the human-readable formatter
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsSection {
    pub storage_timeout_ms: u64,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            storage_timeout_ms: 5_000,
        }
    }
}

/// `<config dir>/smartboard-booking/config.toml`, or `./config.toml` when
/// the platform has no config dir.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("smartboard-booking"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

/// Path from `BOOKING_CONFIG`, else [`default_config_path`].
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path())
}

impl AppConfig {
    /// Read `path`, apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the file at `path`; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Apply `DATABASE_URL`, `JWT_SECRET` and `BOOKING_PORT` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(port) = lookup("BOOKING_PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Env {
                name: "BOOKING_PORT",
                value: port.clone(),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret must not be empty".into()));
        }
        if self.security.faculty_token_ttl_minutes <= 0 || self.security.admin_token_ttl_hours <= 0 {
            return Err(ConfigError::Invalid("token lifetimes must be positive".into()));
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::Invalid("security.bcrypt_cost must be within 4..=31".into()));
        }
        if self.limits.storage_timeout_ms == 0 {
            return Err(ConfigError::Invalid("limits.storage_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret.clone(),
            issuer: self.security.jwt_issuer.clone(),
            faculty_ttl: chrono::Duration::minutes(self.security.faculty_token_ttl_minutes),
            admin_ttl: chrono::Duration::hours(self.security.admin_token_ttl_hours),
        }
    }

    pub fn default_admin(&self) -> AdminAccount {
        AdminAccount {
            admin_id: self.admin.admin_id.clone(),
            name: self.admin.name.clone(),
            position: self.admin.position.clone(),
            branch: self.admin.branch.clone(),
            email: self.admin.email.clone(),
            phone: self.admin.phone.clone(),
            password: self.admin.password.clone(),
        }
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.limits.storage_timeout_ms)
    }

    /// Dotted names of shipped credentials still in effect
    pub fn insecure_defaults(&self) -> Vec<&'static str> {
        let mut found = Vec::new();
        if self.security.jwt_secret == DEFAULT_JWT_SECRET {
            found.push("security.jwt_secret");
        }
        if self.admin.password == DEFAULT_ADMIN_PASSWORD {
            found.push("admin.password");
        }
        found
    }
}
