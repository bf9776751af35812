pub mod agent;
pub mod security;
pub mod transport;
pub mod utils;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::agent::config::AgentConfig;
use crate::agent::payload;
use crate::security::token;
use crate::transport::apply::{self, ApplyError};

// Crate version exposed for runtime queries
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load config and request, sign the payload, submit it to the agent and
/// print the outcome. Returns the process exit code: zero only for HTTP 200.
///
/// A connection failure prints the error instead of a status line; every
/// other failure propagates to the caller.
pub async fn run(config_path: &Path, request_path: &Path) -> Result<u8> {
    let config = AgentConfig::from_file(config_path)
        .with_context(|| format!("loading agent config {}", config_path.display()))?;
    let secret = config
        .decode_shared_secret()
        .context("decoding shared-secret")?;

    let url = config.apply_url();
    debug!(url = %url, "loaded agent config");

    let claims = payload::load_payload(request_path)
        .with_context(|| format!("loading request payload {}", request_path.display()))?;

    let token = token::sign_payload(&claims, &secret).context("signing request payload")?;

    match apply::post_token(&url, token).await {
        Ok(resp) => {
            println!("Status code: {}", resp.status);
            println!("{}", resp.body);

            Ok(if resp.is_ok() { 0 } else { 1 })
        }
        Err(err @ ApplyError::Connect(_)) => {
            println!("{err}");
            Ok(1)
        }
        Err(err) => Err(err.into()),
    }
}
