//! Blocking HTTP access to a target.
//!
//! Shared by version reconciliation and the pipelines API client. Responses
//! with a non-success status are turned into [`FlyError::HttpStatus`], and
//! JSON bodies are decoded separately from the transfer so decode failures
//! surface as [`FlyError::Decode`].

use crate::error::{FlyError, Result};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

/// Fetches resources from a target over HTTP/HTTPS.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    token: Option<String>,
}

impl HttpFetcher {
    /// Create a fetcher that verifies TLS certificates.
    pub fn new() -> Result<Self> {
        Self::with_insecure(false)
    }

    /// Create a fetcher, optionally skipping TLS certificate verification.
    ///
    /// Proxy settings are taken from the environment.
    pub fn with_insecure(insecure: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("fly-resource/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(FlyError::HttpClient)?;

        Ok(Self {
            client,
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
        self
    }

    /// GET `url`, failing on transport errors and non-success statuses.
    pub fn get(&self, url: &str) -> Result<Response> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("GET {}", url);
        let response = request.send().map_err(|source| FlyError::Http {
            url: url.to_string(),
            source,
        })?;

        if !response.status().is_success() {
            return Err(FlyError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// `what` names the payload in decode errors.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let body = self.get(url)?.bytes().map_err(|source| FlyError::Http {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| FlyError::Decode {
            what: what.to_string(),
            source,
        })
    }
}

/// Join a target and an API path, ignoring a trailing `/` on the target.
pub fn endpoint(target: &str, path: &str) -> String {
    format!("{}{}", target.trim_end_matches('/'), path)
}
