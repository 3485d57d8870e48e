//! Direct access to a target's pipelines API.

use crate::error::{FlyError, Result};
use crate::http::{endpoint, HttpFetcher};
use serde::{Deserialize, Serialize};

/// A pipeline as listed by `/api/v1/teams/<team>/pipelines`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Pipeline name.
    pub name: String,
    /// Database id on the target.
    #[serde(default)]
    pub id: u64,
    /// Whether new builds are held.
    #[serde(default)]
    pub paused: bool,
    /// Whether the pipeline is visible without logging in.
    #[serde(default)]
    pub public: bool,
    /// Owning team.
    #[serde(default)]
    pub team_name: String,
}

/// Read access to the pipelines of a target.
pub trait Client {
    /// Pipelines belonging to `team`, in the order the target returns them.
    fn pipelines(&self, team: &str) -> Result<Vec<Pipeline>>;
}

/// [`Client`] talking to the target over HTTP.
#[derive(Debug, Clone)]
pub struct HttpClient {
    target: String,
    insecure: bool,
    token: Option<String>,
}

impl HttpClient {
    /// Create a client for `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            insecure: false,
            token: None,
        }
    }

    /// Skip TLS certificate verification.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Authenticate with a bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// URL listing the pipelines of `team`.
    pub fn pipelines_url(&self, team: &str) -> String {
        endpoint(&self.target, &format!("/api/v1/teams/{}/pipelines", team))
    }

    fn fetcher(&self) -> Result<HttpFetcher> {
        let fetcher = HttpFetcher::with_insecure(self.insecure)?;
        Ok(match &self.token {
            Some(token) => fetcher.with_bearer_token(token.as_str()),
            None => fetcher,
        })
    }
}

impl Client for HttpClient {
    fn pipelines(&self, team: &str) -> Result<Vec<Pipeline>> {
        if self.target.is_empty() {
            return Err(FlyError::EmptyTarget);
        }
        self.fetcher()?
            .get_json(&self.pipelines_url(team), "pipelines response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn plain_base(server: &MockServer) -> String {
        format!("http://{}", server.address())
    }

    #[test]
    fn pipelines_url_for_team() {
        let client = HttpClient::new("https://ci.example.com/");
        assert_eq!(
            client.pipelines_url("main"),
            "https://ci.example.com/api/v1/teams/main/pipelines"
        );
    }

    #[test]
    fn empty_target_is_rejected() {
        let err = HttpClient::new("").pipelines("main").unwrap_err();
        assert!(matches!(err, FlyError::EmptyTarget));
    }

    #[test]
    fn lists_pipelines_in_server_order() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/teams/main/pipelines");
            then.status(200).body(
                r#"[{"id":2,"name":"web","paused":true,"public":false,"team_name":"main"},
                    {"id":1,"name":"api"}]"#,
            );
        });

        let pipelines = HttpClient::new(plain_base(&server)).pipelines("main").unwrap();

        assert_eq!(pipelines.len(), 2);
        assert_eq!(pipelines[0].name, "web");
        assert!(pipelines[0].paused);
        assert_eq!(pipelines[0].team_name, "main");
        assert_eq!(pipelines[1].name, "api");
        assert!(!pipelines[1].public);
    }

    #[test]
    fn sends_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/teams/ops/pipelines")
                .header("Authorization", "Bearer t0k3n");
            then.status(200).body("[]");
        });

        let pipelines = HttpClient::new(plain_base(&server))
            .token("t0k3n")
            .pipelines("ops")
            .unwrap();

        assert!(pipelines.is_empty());
        mock.assert();
    }

    #[test]
    fn unauthorized_is_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/teams/main/pipelines");
            then.status(401);
        });

        let err = HttpClient::new(plain_base(&server))
            .pipelines("main")
            .unwrap_err();

        assert!(matches!(err, FlyError::HttpStatus { status: 401, .. }));
    }

    #[test]
    fn missing_name_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/teams/main/pipelines");
            then.status(200).body(r#"[{"id":1}]"#);
        });

        let err = HttpClient::new(plain_base(&server))
            .pipelines("main")
            .unwrap_err();

        assert!(matches!(err, FlyError::Decode { .. }));
    }
}
