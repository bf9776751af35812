use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Final state of the apply exchange, as relayed to the user.
#[derive(Debug)]
pub struct ApplyResponse {
    pub status: u16,
    pub body: String,
}

impl ApplyResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Error)]
pub enum ApplyError {
    /// The agent could not be reached at all.
    #[error("{0}")]
    Connect(reqwest::Error),
    #[error("sending apply request: {0}")]
    Request(reqwest::Error),
    #[error("reading apply response: {0}")]
    Body(reqwest::Error),
}

/// POST the signed token to the apply endpoint and collect the response.
/// One request, no retries. Connection failures are kept separate from
/// other request errors so the caller can honor the exit-code contract.
pub async fn post_token(url: &str, token: String) -> Result<ApplyResponse, ApplyError> {
    let client = Client::new();

    debug!(url = %url, "sending apply request");

    let resp = client
        .post(url)
        .header(CONTENT_TYPE, "application/jwt")
        .body(token)
        .send()
        .await
        .map_err(|err| {
            if err.is_connect() {
                ApplyError::Connect(err)
            } else {
                ApplyError::Request(err)
            }
        })?;

    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(ApplyError::Body)?;

    debug!(status_code = %status, "received apply response");

    Ok(ApplyResponse { status, body })
}
