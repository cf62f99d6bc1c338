use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_session_file")]
    pub session_file: String,
    #[serde(default = "default_splash_delay")]
    pub splash_delay_ms: u64,
    #[serde(default = "default_email_code")]
    pub otp_email_code: String,
    #[serde(default = "default_sms_code")]
    pub otp_sms_code: String,
}

fn default_session_file() -> String {
    Config::session_path().to_string_lossy().to_string()
}
fn default_splash_delay() -> u64 {
    2000
}
fn default_email_code() -> String {
    "1234".to_string()
}
fn default_sms_code() -> String {
    "6789".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            session_file: default_session_file(),
            splash_delay_ms: default_splash_delay(),
            otp_email_code: default_email_code(),
            otp_sms_code: default_sms_code(),
        }
    }
}

impl Config {
    /// Standard configuration directory (`~/.nutriauth`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nutriauth")
    }

    /// Full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("nutriauth.conf")
    }

    /// Full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("nutriauth.sqlite")
    }

    /// Full path of the preferences file holding the session
    pub fn session_path() -> PathBuf {
        Self::config_dir().join("prefs.json")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.session_file = expand_tilde(&cfg.session_file)
            .to_string_lossy()
            .to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    /// OTP codes are entered through four single-digit cells.
    pub fn validate(&self) -> AppResult<()> {
        for code in [&self.otp_email_code, &self.otp_sms_code] {
            if code.len() != 4 || !code.chars().all(|c| c.is_ascii_digit()) {
                return Err(AppError::Config(format!(
                    "OTP code must be exactly 4 digits: '{}'",
                    code
                )));
            }
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Resolve a user-supplied file name: `~/` is expanded and relative
    /// names land inside the config directory.
    pub fn resolve_path(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize configuration, database and preferences locations.
    ///
    /// In test mode the config file itself is never written.
    pub fn init_all(
        custom_db: Option<&str>,
        custom_session: Option<&str>,
        is_test: bool,
    ) -> AppResult<Config> {
        fs::create_dir_all(Self::config_dir())?;

        let config = Config {
            database: custom_db
                .map(Self::resolve_path)
                .unwrap_or_else(Self::database_file)
                .to_string_lossy()
                .to_string(),
            session_file: custom_session
                .map(Self::resolve_path)
                .unwrap_or_else(Self::session_path)
                .to_string_lossy()
                .to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        Ok(config)
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
