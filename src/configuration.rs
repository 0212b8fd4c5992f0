use std::env;
use std::env::current_dir;
use std::fmt::Display;
use std::time::Duration;

use config::Config;
use config::ConfigError;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::EmailPolicy;
use crate::store_client::StoreClient;

/// Env var read by `check_env`; same key that `config` maps to
/// `Settings.store.base_url`
pub const STORE_URL_VAR: &str = "APP_STORE__BASE_URL";
/// Env var read by `check_env`; maps to `Settings.store.api_key`
pub const STORE_KEY_VAR: &str = "APP_STORE__API_KEY";

/// Global configuration, loaded from the `configuration` dir. See
/// `get_configuration`.
#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub store: StoreSettings,
}

/// Server configuration
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    /// Should be localhost on dev machine, 0.0.0.0 on prod
    pub host: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,

    /// How strictly submitted emails are checked before anything is sent to
    /// the store
    #[serde(default)]
    pub email_policy: EmailPolicy,
}

/// Hosted table configuration.
///
/// `base_url` and `api_key` default to empty strings. A missing or malformed
/// value is not rejected at startup; every insert will fail at the transport
/// layer instead.
#[derive(Deserialize, Clone)]
pub struct StoreSettings {
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "empty_secret")]
    pub api_key: Secret<String>,

    pub table: String,

    /// No local timeout unless set; the transport's own behaviour applies
    #[serde(default)]
    pub timeout_milliseconds: Option<u64>,
}

fn empty_secret() -> Secret<String> { Secret::new(String::new()) }

impl StoreSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }

    pub fn client(&self) -> Result<StoreClient, reqwest::Error> {
        StoreClient::new(
            self.base_url.clone(),
            self.table.clone(),
            self.api_key.clone(),
            self.timeout(),
        )
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Display for Environment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Local => "local",
                Environment::Production => "production",
            }
        )
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            e => Err(format!("Invalid environment: {e}")),
        }
    }
}

/// Load yaml configuration files at `<project_root>/configuration`, then
/// override with `APP_`-prefixed env vars.
///
/// `APP_STORE__BASE_URL=https://xyz.supabase.co` -> `Settings.store.base_url`
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let cfg_dir = current_dir()
        .map_err(|e| ConfigError::Foreign(Box::new(e)))?
        .join("configuration");

    let env: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".to_string())
        .try_into()
        .map_err(ConfigError::Message)?;

    tracing::debug!("loading config for {env} env");

    let settings = Config::builder()
        .add_source(config::File::from(cfg_dir.join("base.yaml")))
        .add_source(config::File::from(cfg_dir.join(format!("{env}.yaml"))))
        // env vars are always parsed as String, hence `serde-aux` for numeric
        // fields
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// What `check_env` prints: whether the store variables are visible to the
/// process, and how long the credential is. The credential itself is never
/// printed.
#[derive(Debug, PartialEq)]
pub struct EnvReport {
    pub store_url: Option<String>,
    pub api_key_len: Option<usize>,
}

impl EnvReport {
    pub fn from_env() -> Self { Self::from_lookup(|k| env::var(k).ok()) }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(STORE_KEY_VAR).map(Secret::new);
        Self {
            store_url: lookup(STORE_URL_VAR),
            api_key_len: api_key.map(|k: Secret<String>| k.expose_secret().len()),
        }
    }
}

impl Display for EnvReport {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "=== Environment Variables Test ===")?;
        writeln!(
            f,
            "{STORE_URL_VAR}: {}",
            self.store_url.as_deref().unwrap_or("undefined")
        )?;
        writeln!(f, "{STORE_KEY_VAR} exists: {}", self.api_key_len.is_some())?;
        match self.api_key_len {
            Some(len) => write!(f, "{STORE_KEY_VAR} length: {len}"),
            None => write!(f, "{STORE_KEY_VAR} length: undefined"),
        }
    }
}
