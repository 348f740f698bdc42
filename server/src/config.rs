use anyhow::{Context, Result, ensure};
use secrecy::SecretString;
use serde::Deserialize;
use std::{env, path::Path};
use url::Url;

pub const CONFIG_PATH_ENV: &str = "HAYKAL_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "haykal.toml";
const ENV_PREFIX: &str = "HAYKAL";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Base URL of the admin backend API.
    pub backend_url: Url,
    #[serde(deserialize_with = "secret_string::deserialize")]
    pub backend_token: SecretString,
    /// Tenant whose data this console administers.
    pub tenant: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "max_page_size")]
    pub max_page_size: usize,
    #[serde(default = "request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_page_size() -> usize {
    types::DEFAULT_PAGE_SIZE
}

fn max_page_size() -> usize {
    100
}

fn request_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load from the file named by `HAYKAL_CONFIG` (or `haykal.toml`), then
    /// apply `HAYKAL_*` environment overrides.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config: Config = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("invalid configuration")?;

        config.validate()?;

        // `Url::join` only appends to paths ending in a slash.
        if !config.backend_url.path().ends_with('/') {
            let path = format!("{}/", config.backend_url.path());
            config.backend_url.set_path(&path);
        }

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(!self.tenant.trim().is_empty(), "tenant must not be empty");
        ensure!(self.max_page_size > 0, "max_page_size must be positive");
        ensure!(
            (1..=self.max_page_size).contains(&self.default_page_size),
            "default_page_size must be between 1 and {}, got {}",
            self.max_page_size,
            self.default_page_size
        );
        Ok(())
    }
}

mod secret_string {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.into())
    }
}
