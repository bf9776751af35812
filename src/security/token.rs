use jsonwebtoken::errors::Error;
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Map, Value};

// HS256 over the payload mapping, matching what the agent verifies on
// /v1/apply. No time-based claims are added, so identical inputs produce
// identical tokens.

/// Sign the request payload as a compact JWT with the decoded shared secret.
pub fn sign_payload(claims: &Map<String, Value>, secret: &[u8]) -> Result<String, Error> {
    jsonwebtoken::encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
}
