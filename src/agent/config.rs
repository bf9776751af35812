use std::fs;
use std::path::Path;

use base64::engine::general_purpose;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

/// Agent connection settings, read from the same TOML file the agent itself
/// is started with. The agent's other sections (keepalived, nftables, ...)
/// live in that file too and are ignored here.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub bind_address: String,
    pub bind_port: u16,
    /// Base64-encoded signing key, kept encoded until
    /// [`decode_shared_secret`](Self::decode_shared_secret) is called.
    pub shared_secret: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("parsing config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("bind-address must be set")]
    MissingAddress,
    #[error("bind-port must be set")]
    MissingPort,
    #[error("shared-secret must be set")]
    MissingSecret,
    #[error("shared-secret is not valid base64: {0}")]
    BadSecret(#[from] base64::DecodeError),
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "bind-address")]
    bind_address: Option<String>,
    #[serde(rename = "bind-port")]
    bind_port: Option<u16>,
    #[serde(rename = "shared-secret")]
    shared_secret: Option<String>,
}

impl AgentConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(raw)?;

        let bind_address = raw
            .bind_address
            .filter(|addr| !addr.is_empty())
            .ok_or(ConfigError::MissingAddress)?;

        let bind_port = match raw.bind_port {
            Some(port) if port > 0 => port,
            _ => return Err(ConfigError::MissingPort),
        };

        let shared_secret = raw
            .shared_secret
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        Ok(Self {
            bind_address,
            bind_port,
            shared_secret,
        })
    }

    /// Decode the base64 shared secret into the raw signing key bytes.
    pub fn decode_shared_secret(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(general_purpose::STANDARD.decode(&self.shared_secret)?)
    }

    /// URL of the agent apply endpoint.
    pub fn apply_url(&self) -> String {
        format!("http://{}:{}/v1/apply", self.bind_address, self.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "bind-address = \"192.0.2.1\"\nbind-port = 15203\nshared-secret = \"c2VjcmV0\""
        )
        .unwrap();

        let cfg = AgentConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.bind_address, "192.0.2.1");
        assert_eq!(cfg.bind_port, 15203);
        assert_eq!(cfg.shared_secret, "c2VjcmV0");
    }

    #[test]
    fn ignores_agent_only_sections() {
        let cfg = AgentConfig::from_toml(
            r#"
bind-address = "127.0.0.1"
bind-port = 15203
shared-secret = "c2VjcmV0"

[keepalived]
enabled = true

[nftables]
filter-table-name = "filter"
"#,
        )
        .unwrap();

        assert_eq!(cfg.bind_port, 15203);
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = AgentConfig::from_toml("bind-port = 1\nshared-secret = \"eA==\"").unwrap_err();
        assert!(matches!(err, ConfigError::MissingAddress));

        let err =
            AgentConfig::from_toml("bind-address = \"::1\"\nshared-secret = \"eA==\"").unwrap_err();
        assert!(matches!(err, ConfigError::MissingPort));

        let err =
            AgentConfig::from_toml("bind-address = \"::1\"\nbind-port = 1").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret));
    }

    #[test]
    fn zero_port_is_rejected() {
        let err = AgentConfig::from_toml(
            "bind-address = \"::1\"\nbind-port = 0\nshared-secret = \"eA==\"",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingPort));
    }

    #[test]
    fn decodes_shared_secret() {
        let cfg = AgentConfig::from_toml(
            "bind-address = \"127.0.0.1\"\nbind-port = 80\nshared-secret = \"c2VjcmV0\"",
        )
        .unwrap();

        assert_eq!(cfg.decode_shared_secret().unwrap(), b"secret");
    }

    #[test]
    fn malformed_base64_secret_fails() {
        let cfg = AgentConfig::from_toml(
            "bind-address = \"127.0.0.1\"\nbind-port = 80\nshared-secret = \"not base64!!\"",
        )
        .unwrap();

        let err = cfg.decode_shared_secret().unwrap_err();
        assert!(matches!(err, ConfigError::BadSecret(_)));
    }

    #[test]
    fn apply_url_is_exact() {
        let cfg = AgentConfig::from_toml(
            "bind-address = \"127.0.0.1\"\nbind-port = 15203\nshared-secret = \"c2VjcmV0\"",
        )
        .unwrap();

        assert_eq!(cfg.apply_url(), "http://127.0.0.1:15203/v1/apply");
    }
}
