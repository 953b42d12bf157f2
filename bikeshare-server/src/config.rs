//! Process configuration.
//!
//! Settings come from `BIKESHARE_*` environment variables. A `.env` file
//! in the working directory is read first, and real environment
//! variables override anything it sets.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::gbfs::{DEFAULT_BASE_URL, GbfsConfig};

const PREFIX: &str = "BIKESHARE_";

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to something unparseable
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: &'static str,
    },

    /// The `.env` file exists but could not be read
    #[error("failed to read {path}: {source}")]
    DotEnv {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "staging" => Ok(Environment::Staging),
            "prod" => Ok(Environment::Prod),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Application name, also used in the client identifier
    pub app_name: String,
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Deployment environment
    pub env: Environment,
    /// Base URL of the GBFS feed
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "bikeshare".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            env: Environment::Dev,
            api_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Load from `./.env` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut vars = read_dotenv(".env")?;
        vars.extend(std::env::vars().filter(|(k, _)| k.starts_with(PREFIX)));
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build settings from a variable lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(&format!("{PREFIX}{name}"));
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: format!("{PREFIX}PORT"),
                value,
                reason: "expected a port number",
            })?,
            None => defaults.port,
        };

        let env = match get("ENV") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: format!("{PREFIX}ENV"),
                value,
                reason: "expected dev, staging or prod",
            })?,
            None => defaults.env,
        };

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or(defaults.app_name),
            host: get("HOST").unwrap_or(defaults.host),
            port,
            env,
            api_url: get("API_URL").unwrap_or(defaults.api_url),
        })
    }

    /// Value of the `Client-Identifier` header, `<app>-<env>`.
    pub fn client_identifier(&self) -> String {
        format!("{}-{}", self.app_name, self.env)
    }

    /// Feed client configuration derived from these settings.
    pub fn gbfs_config(&self) -> GbfsConfig {
        GbfsConfig::new()
            .with_base_url(&self.api_url)
            .with_client_identifier(self.client_identifier())
    }
}

/// Read `KEY=VALUE` pairs from a dotenv file. A missing file is empty.
pub fn read_dotenv(path: impl AsRef<Path>) -> Result<HashMap<String, String>, ConfigError> {
    let path = path.as_ref();
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(source) => {
            return Err(ConfigError::DotEnv {
                path: path.display().to_string(),
                source,
            });
        }
    };
    Ok(parse_dotenv(&contents))
}

fn parse_dotenv(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            Some((key.trim().to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.client_identifier(), "bikeshare-dev");
    }

    #[test]
    fn reads_prefixed_variables() {
        let settings = Settings::from_lookup(lookup(&[
            ("BIKESHARE_APP_NAME", "bysykkel"),
            ("BIKESHARE_HOST", "0.0.0.0"),
            ("BIKESHARE_PORT", "8080"),
            ("BIKESHARE_ENV", "prod"),
            ("BIKESHARE_API_URL", "http://localhost:9000/gbfs"),
        ]))
        .unwrap();

        assert_eq!(settings.app_name, "bysykkel");
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.env, Environment::Prod);
        assert_eq!(settings.api_url, "http://localhost:9000/gbfs");
        assert_eq!(settings.client_identifier(), "bysykkel-prod");

        let gbfs = settings.gbfs_config();
        assert_eq!(gbfs.base_url, "http://localhost:9000/gbfs");
        assert_eq!(gbfs.client_identifier, "bysykkel-prod");
    }

    #[test]
    fn rejects_bad_port() {
        let err = Settings::from_lookup(lookup(&[("BIKESHARE_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "BIKESHARE_PORT"));
    }

    #[test]
    fn rejects_unknown_environment() {
        let err = Settings::from_lookup(lookup(&[("BIKESHARE_ENV", "test")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for BIKESHARE_ENV: \"test\" (expected dev, staging or prod)"
        );
    }

    #[test]
    fn parse_dotenv_lines() {
        let vars = parse_dotenv(
            "# comment\n\
             BIKESHARE_APP_NAME=bysykkel\n\
             export BIKESHARE_ENV = staging\n\
             BIKESHARE_API_URL=\"https://example.com/gbfs\"\n\
             \n\
             not a pair\n",
        );
        assert_eq!(vars.len(), 3);
        assert_eq!(vars["BIKESHARE_APP_NAME"], "bysykkel");
        assert_eq!(vars["BIKESHARE_ENV"], "staging");
        assert_eq!(vars["BIKESHARE_API_URL"], "https://example.com/gbfs");
    }

    #[test]
    fn read_dotenv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "BIKESHARE_PORT='9001'\n").unwrap();

        let vars = read_dotenv(&path).unwrap();
        let settings = Settings::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(settings.port, 9001);
    }

    #[test]
    fn missing_dotenv_is_empty() {
        let dir = tempdir().unwrap();
        let vars = read_dotenv(dir.path().join("absent.env")).unwrap();
        assert!(vars.is_empty());
    }
}
