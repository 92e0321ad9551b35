use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{domain::ChatId, errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_SECS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_PATH: &str = "main.log";

/// Typed configuration, built once at startup and shared by reference.
#[derive(Clone)]
pub struct Config {
    // Secrets
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: ChatId,

    // Review API
    pub endpoint: String,
    pub retry_interval: Duration,
    pub request_timeout: Duration,

    // Logging
    pub log_path: PathBuf,
}

// Tokens stay out of debug output (and therefore out of the log).
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("retry_interval", &self.retry_interval)
            .field("request_timeout", &self.request_timeout)
            .field("log_path", &self.log_path)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load from the process environment, after applying `.env` if present.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let practicum_token = required(&lookup, &["PRAKTIKUM_TOKEN", "PRACTICUM_TOKEN"])?;
        let telegram_token = required(&lookup, &["TELEGRAM_TOKEN"])?;
        let raw_chat_id = required(&lookup, &["TELEGRAM_CHAT_ID"])?;
        let telegram_chat_id = raw_chat_id.trim().parse::<i64>().map(ChatId).map_err(|_| {
            Error::Config(format!(
                "TELEGRAM_CHAT_ID must be an integer, got {raw_chat_id:?}"
            ))
        })?;

        let endpoint = lookup("HOMEWORK_ENDPOINT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let retry_interval =
            Duration::from_secs(parse_u64(lookup("RETRY_TIME_SECS")).unwrap_or(DEFAULT_RETRY_SECS));
        if retry_interval.is_zero() {
            return Err(Error::Config(
                "RETRY_TIME_SECS must be greater than zero".to_string(),
            ));
        }
        let request_timeout = Duration::from_secs(
            parse_u64(lookup("REQUEST_TIMEOUT_SECS")).unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        let log_path = PathBuf::from(
            lookup("LOG_PATH")
                .and_then(non_empty)
                .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string()),
        );

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            retry_interval,
            request_timeout,
            log_path,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, keys: &[&str]) -> Result<String> {
    keys.iter()
        .find_map(|k| lookup(k).and_then(non_empty))
        .ok_or_else(|| Error::Config(format!("{} environment variable is required", keys[0])))
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_u64(v: Option<String>) -> Option<u64> {
    v.and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
