//! Session creation over HTTP.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use game::CreateRequest;
use serde_json::Value;

use crate::CliError;

fn session_endpoint(api_url: &str) -> String {
    format!("{}/api/session", api_url.trim_end_matches('/'))
}

fn session_code(body: &Value) -> Result<String, CliError> {
    body.get("sessionCode")
        .and_then(Value::as_str)
        .filter(|code| !code.is_empty())
        .map(ToOwned::to_owned)
        .ok_or(CliError::MissingField("sessionCode"))
}

/// `POST {api_url}/api/session` and return the new session code.
pub async fn create_session(
    client: &reqwest::Client,
    api_url: &str,
    request: &CreateRequest,
) -> Result<String, CliError> {
    let url = session_endpoint(api_url);
    let response = client.post(&url).json(request).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Status(status.as_u16()));
    }
    let body = response.json::<Value>().await?;
    session_code(&body)
}
