use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub db_max_connections: u32,

    // API settings
    pub api_host: String,
    pub api_port: u16,
    pub request_body_limit_bytes: usize,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Optional values that fail to parse fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if neither `DATABASE_URL` nor `DB_URL` is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            // Database
            database_url: lookup("DATABASE_URL")
                .or_else(|| lookup("DB_URL"))
                .ok_or(ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections: var_or("DB_MAX_CONNECTIONS", "10").parse().unwrap_or(10),

            // API settings
            api_host: var_or("API_HOST", "0.0.0.0"),
            api_port: var_or("API_PORT", "3000").parse().unwrap_or(3000),
            request_body_limit_bytes: var_or("REQUEST_BODY_LIMIT_BYTES", "1048576")
                .parse()
                .unwrap_or(1_048_576), // 1MB default

            // Application metadata
            deployment: Deployment::from_str(&var_or("DEPLOYMENT", "local")),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
