use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = ".cohort/tasks.db";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

const SQLITE_URL_PREFIX: &str = "sqlite:///";

/// Read from the working directory when present.
pub const DOTENV_FILE: &str = ".env";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port in {name}: {value}")]
    InvalidPort { name: &'static str, value: String },
    #[error("invalid host in COHORT_HOST: {value}")]
    InvalidHost { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            db_path: DEFAULT_DB_PATH.to_string(),
        }
    }
}

impl ServeConfig {
    /// Reads the process environment, falling back to values in `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let dotenv = read_dotenv(Path::new(DOTENV_FILE));
        Self::from_layers(|name| std::env::var(name).ok(), &dotenv)
    }

    /// Variables from `env` win over those loaded from a dotenv file.
    pub fn from_layers(
        env: impl Fn(&str) -> Option<String>,
        dotenv: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env(name).or_else(|| dotenv.get(name).cloned()))
    }

    /// Resolves settings through `lookup`, treating empty values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let db_path = get("COHORT_DB_PATH")
            .or_else(|| get("DATABASE_URL").and_then(|url| sqlite_path(&url)))
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let port = match (get("COHORT_PORT"), get("PORT")) {
            (Some(value), _) => parse_port("COHORT_PORT", &value)?,
            (None, Some(value)) => parse_port("PORT", &value)?,
            (None, None) => DEFAULT_PORT,
        };

        let host = match get("COHORT_HOST") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost { value })?,
            None => DEFAULT_HOST,
        };

        Ok(Self {
            host,
            port,
            db_path,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn ensure_db_dir(&self) -> std::io::Result<()> {
        match Path::new(&self.db_path).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

/// Parses a dotenv file. A missing file yields no variables.
pub fn read_dotenv(path: &Path) -> HashMap<String, String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => return HashMap::new(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable dotenv file");
            return HashMap::new();
        }
    };
    let mut vars = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "stopped reading dotenv file");
                break;
            }
        }
    }
    vars
}

fn parse_port(name: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidPort {
        name,
        value: value.to_string(),
    })
}

fn sqlite_path(url: &str) -> Option<String> {
    match url.strip_prefix(SQLITE_URL_PREFIX) {
        Some(path) if !path.is_empty() => Some(path.to_string()),
        _ => {
            tracing::warn!(url, "ignoring DATABASE_URL that is not a sqlite file url");
            None
        }
    }
}
