use serde::{Deserialize, Serialize};

use std::{env, fs, net::SocketAddr, path::Path};

const CONFIG_PATH_VAR: &str = "NOTES_API_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database_dsn: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

impl Config {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                name: "host".to_string(),
                reason: format!("{e}"),
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

fn load_from_file(path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn load_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let database_dsn =
        lookup("PG_DSN").ok_or_else(|| ConfigError::MissingEnvVar("PG_DSN".to_string()))?;

    let host = lookup("HOST").unwrap_or_else(default_host);

    let port = match lookup("PORT") {
        Some(port) => port.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
            name: "PORT".to_string(),
            reason: format!("{e}"),
        })?,
        None => default_port(),
    };

    Ok(Config {
        database_dsn,
        host,
        port,
    })
}

/// Loads the config from the file named by `NOTES_API_CONFIG` (default
/// `config.yaml`), falling back to environment variables when it is absent.
/// `config.example.yaml` documents the file format.
pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to environment variables
    tracing::info!(
        "Config file '{}' not found, attempting to load configuration from environment variables",
        config_path
    );
    load_from_lookup(|name| env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn env_defaults() {
        let config = load_from_lookup(lookup(&[("PG_DSN", "host=db user=notes")])).unwrap();

        assert_eq!(config.database_dsn, "host=db user=notes");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn env_requires_dsn() {
        let err = load_from_lookup(lookup(&[("PORT", "9000")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "PG_DSN"));
    }

    #[test]
    fn env_rejects_bad_port() {
        let err = load_from_lookup(lookup(&[("PG_DSN", "x"), ("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name, .. } if name == "PORT"));
    }

    #[test]
    fn yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("database_dsn: \"host=db\"\nport: 9001\n").unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9001);
        assert_eq!(config.socket_addr().unwrap().port(), 9001);
    }

    #[test]
    fn example_config_parses() {
        let config: Config = serde_yaml::from_str(include_str!("../config.example.yaml")).unwrap();
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn bad_host_is_reported() {
        let config = Config {
            database_dsn: "x".to_string(),
            host: "not a host".to_string(),
            port: 8000,
        };
        assert!(config.socket_addr().is_err());
    }
}
