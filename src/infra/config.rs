use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/";
pub const DEFAULT_DATABASE: &str = "spire";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown store backend '{0}', expected 'mongo' or 'memory'")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Mongo,
    Memory,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Backend::Mongo),
            "memory" => Ok(Backend::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub database: String,
    pub backend: Backend,
}

impl Config {
    /// Reads the process environment, after loading `.env` when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = match lookup("STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => Backend::Mongo,
        };
        Ok(Config {
            mongodb_uri: lookup("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
            database: lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            backend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.mongodb_uri, DEFAULT_MONGODB_URI);
        assert_eq!(config.database, DEFAULT_DATABASE);
        assert_eq!(config.backend, Backend::Mongo);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MONGODB_URI", "mongodb://db:27017/"),
            ("MONGODB_DATABASE", "kitchen"),
            ("STORE_BACKEND", "Memory"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.mongodb_uri, "mongodb://db:27017/");
        assert_eq!(config.database, "kitchen");
        assert_eq!(config.backend, Backend::Memory);
    }

    #[test]
    #[should_panic(expected = "UnknownBackend")]
    fn test_unknown_backend() {
        Config::from_lookup(|key| (key == "STORE_BACKEND").then(|| String::from("redis"))).unwrap();
    }
}
