//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub identity_api_url: String,
    pub identity_secret_key: String,
    pub identity_jwt_secret: String,
    pub session_duration_minutes: u64,
    pub plagiarism_api_url: String,
    pub plagiarism_api_key: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Required variables panic when missing; everything else falls back to a
    /// development default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "project-portal".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/project_portal.db".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .unwrap(),
            identity_api_url: env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| "https://api.identity.localhost".into()),
            identity_secret_key: env::var("IDENTITY_SECRET_KEY").unwrap_or_default(),
            identity_jwt_secret: env::var("IDENTITY_JWT_SECRET")
                .unwrap_or_else(|_| "dev-identity-secret".into()),
            session_duration_minutes: env::var("SESSION_DURATION_MINUTES")
                .unwrap_or("60".into())
                .parse()
                .unwrap(),
            plagiarism_api_url: env::var("PLAGIARISM_API_URL")
                .unwrap_or_else(|_| "https://api.gowinston.ai".into()),
            plagiarism_api_key: env::var("PLAGIARISM_API_KEY").unwrap_or_default(),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap();
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_project_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.project_name = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_identity_api_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.identity_api_url = value.into());
    }

    pub fn set_identity_secret_key(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.identity_secret_key = value.into());
    }

    pub fn set_identity_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.identity_jwt_secret = value.into());
    }

    pub fn set_session_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.session_duration_minutes = value.into());
    }

    pub fn set_plagiarism_api_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.plagiarism_api_url = value.into());
    }

    pub fn set_plagiarism_api_key(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.plagiarism_api_key = value.into());
    }
}

// --- Free accessor functions ---
//
// Call sites use `config::port()` rather than threading the guard around.

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn identity_api_url() -> String {
    AppConfig::global().identity_api_url.clone()
}

pub fn identity_secret_key() -> String {
    AppConfig::global().identity_secret_key.clone()
}

pub fn identity_jwt_secret() -> String {
    AppConfig::global().identity_jwt_secret.clone()
}

pub fn session_duration_minutes() -> u64 {
    AppConfig::global().session_duration_minutes
}

pub fn plagiarism_api_url() -> String {
    AppConfig::global().plagiarism_api_url.clone()
}

pub fn plagiarism_api_key() -> String {
    AppConfig::global().plagiarism_api_key.clone()
}
