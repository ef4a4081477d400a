//! Authenticated HTTP transport for the todo API.
//!
//! # Design
//! `Transport` owns a blocking `ureq` agent plus a credential pair fixed at
//! construction; every request carries the precomputed Basic `Authorization`
//! header. The agent is built with `http_status_as_error(false)` so non-2xx
//! responses come back as data, and `finish` turns anything outside 200-299
//! into a [`TransportError::Status`] carrying the code and reason phrase.
//! Callers receive the raw body text on success and never touch connection
//! state; each response is fully consumed and dropped inside the call, on
//! success and failure alike.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::TransportError;

const AUTHORIZATION: &str = "authorization";

/// Blocking HTTP transport with HTTP Basic authentication.
#[derive(Clone)]
pub struct Transport {
    agent: ureq::Agent,
    authorization: String,
}

impl Transport {
    /// A transport that authenticates every request as `username`.
    pub fn new(username: &str, password: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            authorization: basic_authorization(username, password),
        }
    }

    pub fn get(&self, url: &str) -> Result<String, TransportError> {
        tracing::debug!(url, "GET");
        finish(
            self.agent
                .get(url)
                .header(AUTHORIZATION, &self.authorization)
                .call(),
        )
    }

    pub fn delete(&self, url: &str) -> Result<String, TransportError> {
        tracing::debug!(url, "DELETE");
        finish(
            self.agent
                .delete(url)
                .header(AUTHORIZATION, &self.authorization)
                .call(),
        )
    }

    pub fn post(&self, url: &str, content_type: &str, body: &str) -> Result<String, TransportError> {
        tracing::debug!(url, "POST");
        finish(
            self.agent
                .post(url)
                .header(AUTHORIZATION, &self.authorization)
                .content_type(content_type)
                .send(body.as_bytes()),
        )
    }

    pub fn put(&self, url: &str, content_type: &str, body: &str) -> Result<String, TransportError> {
        tracing::debug!(url, "PUT");
        finish(
            self.agent
                .put(url)
                .header(AUTHORIZATION, &self.authorization)
                .content_type(content_type)
                .send(body.as_bytes()),
        )
    }
}

/// Map a completed exchange to body text, faulting outside the 2xx window.
fn finish(
    result: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> Result<String, TransportError> {
    let mut response = result.map_err(|e| {
        tracing::warn!(error = %e, "request failed before a status arrived");
        TransportError::Io(e.to_string())
    })?;
    let status = response.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("").to_string();
        tracing::warn!(status = status.as_u16(), %reason, "server rejected request");
        return Err(TransportError::Status {
            status: status.as_u16(),
            reason,
        });
    }
    response
        .body_mut()
        .read_to_string()
        .map_err(|e| TransportError::Io(e.to_string()))
}

/// `Authorization` header value for HTTP Basic auth.
fn basic_authorization(username: &str, password: &str) -> String {
    let credentials = STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {credentials}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_authorization_encodes_the_credential_pair() {
        assert_eq!(basic_authorization("jason", "jason"), "Basic amFzb246amFzb24=");
    }

    #[test]
    fn basic_authorization_matches_the_rfc_example() {
        // RFC 7617's user-id/password example.
        assert_eq!(
            basic_authorization("Aladdin", "open sesame"),
            "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
        );
    }
}
