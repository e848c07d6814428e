//! Service endpoints baked in at build time.
//!
//! `GUESS_API_URL` names the HTTP base for session creation and
//! `GUESS_SOCKET_URL` the realtime channel base. Either may be unset; the
//! socket falls back to the API base and the API base to a local service.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub socket_url: String,
}

impl ClientConfig {
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::resolve(option_env!("GUESS_API_URL"), option_env!("GUESS_SOCKET_URL"))
    }

    fn resolve(api_url: Option<&str>, socket_url: Option<&str>) -> Self {
        let api_url = normalize(api_url).unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let socket_url = normalize(socket_url).unwrap_or_else(|| api_url.clone());
        Self { api_url, socket_url }
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
