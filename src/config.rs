use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::time::Duration;

const PLACEHOLDER_JWT_SECRET: &str = "your-secret-key";

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub database_min_connections: u32,
    #[serde(default = "default_connection_timeout")]
    pub database_connection_timeout: u64,

    #[serde(default)]
    pub redis_url: Option<String>,

    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default)]
    pub jwt_issuer: Option<String>,
    #[serde(default)]
    pub jwt_audience: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,

    #[serde(default = "default_invitation_ttl_days")]
    pub invitation_ttl_days: i64,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

// Default value functions
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connection_timeout() -> u64 {
    30
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_invitation_ttl_days() -> i64 {
    7
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = envy::from_env::<Config>()
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.database_max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS must be > 0".to_string(),
            ));
        }

        if self.database_min_connections > self.database_max_connections {
            return Err(AppError::Config(
                "DATABASE_MIN_CONNECTIONS cannot be greater than DATABASE_MAX_CONNECTIONS"
                    .to_string(),
            ));
        }

        if self.jwt_secret.is_empty() || self.jwt_secret == PLACEHOLDER_JWT_SECRET {
            return Err(AppError::Config(
                "JWT_SECRET must be set to a secure value".to_string(),
            ));
        }

        if !(1..=90).contains(&self.invitation_ttl_days) {
            return Err(AppError::Config(
                "INVITATION_TTL_DAYS must be between 1 and 90".to_string(),
            ));
        }

        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            min_connections: self.database_min_connections,
            connection_timeout: Duration::from_secs(self.database_connection_timeout),
        }
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            issuer: self.jwt_issuer.clone(),
            audience: self.jwt_audience.clone(),
        }
    }

    pub fn invitation_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.invitation_ttl_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Config {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>();
        envy::from_iter::<_, Config>(vars).expect("config should deserialize")
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/teamboard"),
            ("JWT_SECRET", "s3cr3t"),
        ]);
        assert_eq!(config.server_address(), "127.0.0.1:8000");
        assert_eq!(config.invitation_ttl(), chrono::Duration::days(7));
        assert_eq!(config.redis_url, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn placeholder_secret_is_rejected() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/teamboard")]);
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn pool_bounds_are_checked() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/teamboard"),
            ("JWT_SECRET", "s3cr3t"),
            ("DATABASE_MIN_CONNECTIONS", "30"),
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn invitation_ttl_must_be_reasonable() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/teamboard"),
            ("JWT_SECRET", "s3cr3t"),
            ("INVITATION_TTL_DAYS", "0"),
        ]);
        assert!(config.validate().is_err());
    }
}
