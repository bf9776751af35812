use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("reading request file: {0}")]
    Read(#[from] std::io::Error),
    #[error("parsing request file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("request document must be a mapping")]
    NotAMapping,
}

/// Load the request payload from a YAML file. The document becomes the token
/// claims as-is, so the top level must be a mapping.
pub fn load_payload(path: impl AsRef<Path>) -> Result<Map<String, Value>, PayloadError> {
    let raw = fs::read_to_string(path)?;
    parse_payload(&raw)
}

fn parse_payload(raw: &str) -> Result<Map<String, Value>, PayloadError> {
    match serde_yaml::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(PayloadError::NotAMapping),
    }
}
