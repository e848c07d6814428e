//! REST helper for creating a game session.
//!
//! Browser builds (`csr`) make the real call via `gloo-net`; native builds
//! (tests, tooling) get an error since there is no fetch outside the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is a [`CreateSessionError`]; the caller logs it and shows the
//! generic "Error creating session" notice. There is no retry.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use game::CreateRequest;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum CreateSessionError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("create session failed: {0}")]
    Status(u16),
    #[error("invalid session response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("session response has no code")]
    MissingCode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionResponse {
    #[serde(default)]
    session_code: Option<String>,
}

fn session_endpoint(api_url: &str) -> String {
    format!("{}/api/session", api_url.trim_end_matches('/'))
}

fn parse_session_response(body: &str) -> Result<String, CreateSessionError> {
    let response: CreateSessionResponse = serde_json::from_str(body)?;
    response
        .session_code
        .filter(|code| !code.is_empty())
        .ok_or(CreateSessionError::MissingCode)
}

/// Create a session via `POST {api_url}/api/session` and return its code.
///
/// # Errors
///
/// Returns a [`CreateSessionError`] when the request fails, the status is not
/// successful, or the body carries no `sessionCode`.
pub async fn create_session(api_url: &str, request: &CreateRequest) -> Result<String, CreateSessionError> {
    #[cfg(feature = "csr")]
    {
        let url = session_endpoint(api_url);
        let resp = gloo_net::http::Request::post(&url)
            .json(request)
            .map_err(|e| CreateSessionError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| CreateSessionError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(CreateSessionError::Status(resp.status()));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| CreateSessionError::Transport(e.to_string()))?;
        parse_session_response(&body)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (session_endpoint(api_url), request);
        Err(CreateSessionError::Transport("not available outside the browser".to_owned()))
    }
}
