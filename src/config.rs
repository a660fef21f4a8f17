/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, JWT_*)
 * - 起動時に一度だけ組み立て、以後は不変 (&Config で渡す)
 * - JWT_SECRET 未設定: development は "secret" に fallback (warn)、production は起動失敗
 */
use std::fmt;
use std::net::SocketAddr;

const DEFAULT_PORT: u16 = 3001;
const DEV_FALLBACK_SECRET: &str = "secret";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for access-token verification.
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// `true` when `secret` is the development fallback rather than `JWT_SECRET`.
    pub secret_is_fallback: bool,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("JwtSettings")
            .field("secret_is_fallback", &self.secret_is_fallback)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub jwt: JwtSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        // Only unset or "" falls back; a whitespace-only secret is still a secret.
        let (secret, secret_is_fallback) = match lookup("JWT_SECRET").filter(|v| !v.is_empty()) {
            Some(secret) => (secret, false),
            None if app_env.is_production() => return Err(ConfigError::Missing("JWT_SECRET")),
            None => (DEV_FALLBACK_SECRET.to_string(), true),
        };

        let leeway_seconds = match lookup("JWT_LEEWAY_SECONDS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("JWT_LEEWAY_SECONDS"))?,
            None => 0,
        };

        Ok(Self {
            addr,
            app_env,
            jwt: JwtSettings {
                secret,
                secret_is_fallback,
                issuer: non_empty(lookup("JWT_ISSUER")),
                audience: non_empty(lookup("JWT_AUDIENCE")),
                leeway_seconds,
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
