//! Pipelines API of a target, without going through fly.

pub mod client;
pub mod fake;

pub use client::{Client, HttpClient, Pipeline};
pub use fake::FakeClient;
