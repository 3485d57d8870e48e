//! Recording fake of the pipelines [`Client`].

use super::client::{Client, Pipeline};
use crate::error::Result;
use crate::fake::{Invocations, Recorder};
use std::collections::HashMap;

/// In-memory [`Client`] that records the team of every call.
///
/// # Example
///
/// ```
/// use fly_resource::api::{Client, FakeClient, Pipeline};
///
/// let fake = FakeClient::new();
/// fake.pipelines.returns(vec![Pipeline { name: "web".into(), ..Default::default() }]);
///
/// let pipelines = fake.pipelines("main").unwrap();
/// assert_eq!(pipelines[0].name, "web");
/// assert_eq!(fake.pipelines.args_for_call(0), Some("main".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct FakeClient {
    /// Teams passed to `pipelines`.
    pub pipelines: Recorder<String, Vec<Pipeline>>,
    invocations: Invocations,
}

impl FakeClient {
    /// Create a fake that returns no pipelines until configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, keyed by method name.
    pub fn invocations(&self) -> HashMap<String, Vec<String>> {
        self.invocations.all()
    }
}

impl Client for FakeClient {
    fn pipelines(&self, team: &str) -> Result<Vec<Pipeline>> {
        self.invocations.record("pipelines", &team);
        self.pipelines.record(team.to_string())
    }
}
