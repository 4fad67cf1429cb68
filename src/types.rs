use reqwest::Url;
use std::{env, fmt, time::Duration};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_PORTAL_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }

    /// Whether log lines carry ANSI color codes.
    pub fn uses_ansi_logs(&self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
}

#[derive(Clone)]
pub struct PortalContext {
    /// Base url without a trailing slash, e.g. `https://portal.example.com`.
    pub api_endpoint: String,
    pub http_client: reqwest::Client,
}

impl PortalContext {
    pub fn referral_endpoint(&self) -> String {
        format!("{}/api/referral/", self.api_endpoint)
    }
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub portal: PortalContext,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub url: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppConfig,
    pub portal: PortalConfig,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "{} not set", key),
            Self::Invalid(key, reason) => write!(f, "Invalid {}: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let environment = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|err| ConfigError::Invalid("PORT", err.to_string()))?,
            None => DEFAULT_PORT,
        };
        let portal_url = lookup("PORTAL_URL").ok_or(ConfigError::Missing("PORTAL_URL"))?;
        let portal_timeout_secs = match lookup("PORTAL_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => Err(ConfigError::Invalid(
                    "PORTAL_TIMEOUT_SECS",
                    String::from("must be greater than zero"),
                ))?,
                Ok(secs) => secs,
                Err(err) => Err(ConfigError::Invalid("PORTAL_TIMEOUT_SECS", err.to_string()))?,
            },
            None => DEFAULT_PORTAL_TIMEOUT_SECS,
        };

        Ok(Self {
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
            },
            portal: PortalConfig {
                url: validate_portal_url(&portal_url)?,
                timeout: Duration::from_secs(portal_timeout_secs),
            },
        })
    }
}

fn validate_portal_url(raw: &str) -> Result<String, ConfigError> {
    let url =
        Url::parse(raw).map_err(|err| ConfigError::Invalid("PORTAL_URL", err.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        Err(ConfigError::Invalid(
            "PORTAL_URL",
            format!("unsupported scheme `{}`", url.scheme()),
        ))?
    }

    if url.query().is_some() || url.fragment().is_some() {
        Err(ConfigError::Invalid(
            "PORTAL_URL",
            String::from("query strings and fragments are not allowed"),
        ))?
    }

    Ok(raw.trim_end_matches('/').to_string())
}

pub trait ToContext {
    fn to_context(self) -> Result<Context, ConfigError>;
}

impl ToContext for Config {
    fn to_context(self) -> Result<Context, ConfigError> {
        let http_client = reqwest::Client::builder()
            .timeout(self.portal.timeout)
            .build()
            .map_err(|err| {
                tracing::error!("Failed to create portal http client: {:?}", err);
                ConfigError::Invalid("PORTAL_TIMEOUT_SECS", err.to_string())
            })?;

        Ok(Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
            },
            portal: PortalContext {
                api_endpoint: self.portal.url,
                http_client,
            },
        })
    }
}
