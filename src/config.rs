/// Configuration management
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_host")]
    pub server_host: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    pub database_url: String,
    /// Symmetric signing secret for bearer tokens, minimum 32 bytes.
    pub jwt_secret: String,
    /// Access-token lifetime in seconds. Tokens are issued with an `exp`
    /// claim derived from this value.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
    /// Comma-separated list of allowed CORS origins.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,

    // Optional bootstrap account created at startup when absent.
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub admin_email: Option<String>,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_token_ttl_secs() -> i64 {
    3600
}

fn default_cors_origins() -> String {
    "http://localhost,http://localhost:3000".to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_split_and_trim() {
        let config = Config {
            server_host: default_server_host(),
            server_port: default_server_port(),
            database_url: "postgres://localhost/tasks".to_string(),
            jwt_secret: "x".repeat(32),
            token_ttl_secs: default_token_ttl_secs(),
            cors_origins: "http://localhost, http://localhost:3000 ,".to_string(),
            admin_username: None,
            admin_password: None,
            admin_email: None,
        };

        assert_eq!(
            config.allowed_origins(),
            vec!["http://localhost", "http://localhost:3000"]
        );
    }
}
