use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub trivia: TriviaConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations_on_boot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaConfig {
    /// Fixed page size for the question list (pages are 1-indexed).
    pub questions_per_page: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub jwt_secret: String,
    /// PEM-encoded RSA public key of the token issuer. When set, bearer
    /// tokens are verified with RS256; otherwise HS256 with jwt_secret.
    pub jwt_public_key: Option<String>,
    pub jwt_audience: String,
    pub jwt_issuer: String,
    pub jwt_expiry_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations_on_boot = v.parse().unwrap_or(self.database.run_migrations_on_boot);
        }

        // Trivia overrides
        if let Ok(v) = env::var("TRIVIA_QUESTIONS_PER_PAGE") {
            self.trivia.questions_per_page = v.parse().unwrap_or(self.trivia.questions_per_page);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_PUBLIC_KEY") {
            self.security.jwt_public_key = Some(v);
        }
        if let Ok(v) = env::var("JWT_AUDIENCE") {
            self.security.jwt_audience = v;
        }
        if let Ok(v) = env::var("JWT_ISSUER") {
            self.security.jwt_issuer = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
                run_migrations_on_boot: true,
            },
            trivia: TriviaConfig { questions_per_page: 10 },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: "stagecraft-dev-secret".to_string(),
                jwt_public_key: None,
                jwt_audience: "stagecraft".to_string(),
                jwt_issuer: "https://stagecraft.dev/".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
                run_migrations_on_boot: true,
            },
            trivia: TriviaConfig { questions_per_page: 10 },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: String::new(),
                jwt_public_key: None,
                jwt_audience: "stagecraft".to_string(),
                jwt_issuer: "https://staging.stagecraft.example.com/".to_string(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
                run_migrations_on_boot: false,
            },
            trivia: TriviaConfig { questions_per_page: 10 },
            security: SecurityConfig {
                enable_cors: true,
                jwt_secret: String::new(),
                jwt_public_key: None,
                jwt_audience: "stagecraft".to_string(),
                jwt_issuer: "https://stagecraft.example.com/".to_string(),
                jwt_expiry_hours: 4,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
