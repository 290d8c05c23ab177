// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use crate::rate_limit::RateLimitSettings;
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "SUBURBSIGHT_";

/// Application settings
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Directory leads are written under
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Mark the admin session cookie `Secure`. Off by default for local
    /// development; production config must set it.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Admin password. Absent means the admin surface rejects every login.
    #[serde(default)]
    pub admin_password: Option<SecretString>,
    /// Budget for lead submissions
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    /// Budget for login attempts
    #[serde(default = "RateLimitSettings::login_default")]
    pub login_rate_limit: RateLimitSettings,
}

fn default_bind_addr() -> SocketAddr {
    "127.0.0.1:3000".parse().expect("static bind address")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            cookie_secure: false,
            admin_password: None,
            rate_limit: RateLimitSettings::default(),
            login_rate_limit: RateLimitSettings::login_default(),
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` and `SUBURBSIGHT_`-prefixed
    /// environment variables; the environment wins. Nested fields use `__`,
    /// e.g. `SUBURBSIGHT_RATE_LIMIT__MAX_REQUESTS`.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load settings with an explicit config file path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings: Settings = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(settings)
    }

    /// Reject configurations the server cannot meaningfully run with.
    pub fn validate(&self) -> Result<()> {
        if !matches!(
            self.log_level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            bail!("invalid log level: {}", self.log_level);
        }
        for (name, limits) in [
            ("rate_limit", &self.rate_limit),
            ("login_rate_limit", &self.login_rate_limit),
        ] {
            if limits.max_requests == 0 {
                bail!("{name}.max_requests must be greater than zero");
            }
            if limits.window_secs == 0 {
                bail!("{name}.window_secs must be greater than zero");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn default_rate_limits() {
        let settings = Settings::default();
        assert_eq!(settings.rate_limit.max_requests, 5);
        assert_eq!(settings.rate_limit.window_secs, 3600);
    }

    #[test]
    fn rejects_invalid_log_level() {
        let mut settings = Settings::default();
        settings.log_level = "loud".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_zero_rate_limits() {
        let mut settings = Settings::default();
        settings.rate_limit.max_requests = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.login_rate_limit.window_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn loads_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            bind_addr = "127.0.0.1:8088"
            log_level = "debug"
            cookie_secure = true

            [rate_limit]
            max_requests = 3
            window_secs = 60
            "#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:8088");
        assert_eq!(settings.log_level, "debug");
        assert!(settings.cookie_secure);
        assert_eq!(settings.rate_limit.max_requests, 3);
        assert_eq!(settings.rate_limit.window_secs, 60);
        // untouched sections keep their defaults
        assert_eq!(settings.login_rate_limit.max_requests, 10);
        assert!(settings.admin_password.is_none());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load_from("does-not-exist.toml").unwrap();
        assert_eq!(settings.bind_addr, default_bind_addr());
        assert!(settings.admin_password.is_none());
    }
}
