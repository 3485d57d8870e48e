//! Tests for the public library API.

use fly_resource::api::{Client, FakeClient, Pipeline};
use fly_resource::fly::{FakeFlyCommand, FlyCommand, LoginParams};
use fly_resource::version::{versions_compatible, Platform};
use fly_resource::FlyError;
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Code written against the trait works with the fake.
fn deploy(fly: &dyn FlyCommand, name: &str) -> fly_resource::Result<()> {
    if !fly.pipelines()?.iter().any(|p| p == name) {
        let mut vars = HashMap::new();
        vars.insert("env".to_string(), json!("prod"));
        fly.set_pipeline(name, Path::new("pipeline.yml"), &[], &vars)?;
        fly.unpause_pipeline(name)?;
    }
    fly.expose_pipeline(name)?;
    Ok(())
}

#[test]
fn fake_drives_trait_consumers() {
    let fly = FakeFlyCommand::new();
    fly.pipelines.returns(vec!["other".to_string()]);

    deploy(&fly, "web").unwrap();

    assert_eq!(fly.set_pipeline.call_count(), 1);
    let call = fly.set_pipeline.args_for_call(0).unwrap();
    assert_eq!(call.config_file, PathBuf::from("pipeline.yml"));
    assert_eq!(call.vars["env"], json!("prod"));
    assert_eq!(fly.unpause_pipeline.calls(), vec!["web".to_string()]);
    assert_eq!(fly.expose_pipeline.call_count(), 1);
}

#[test]
fn fake_skips_existing_pipeline() {
    let fly = FakeFlyCommand::new();
    fly.pipelines.returns(vec!["web".to_string()]);

    deploy(&fly, "web").unwrap();

    assert_eq!(fly.set_pipeline.call_count(), 0);
    assert_eq!(fly.unpause_pipeline.call_count(), 0);
    assert_eq!(fly.expose_pipeline.call_count(), 1);
}

#[test]
fn fake_stub_and_errors() {
    let fly = FakeFlyCommand::new();
    fly.login.set_stub(|params: &LoginParams| {
        if params.has_credentials() {
            Ok(b"ok".to_vec())
        } else {
            Err(FlyError::ConfigValidation {
                message: "no credentials".to_string(),
            })
        }
    });

    let anonymous = fly.login(&LoginParams::default());
    let authed = fly.login(&LoginParams {
        url: "https://ci".into(),
        team: "main".into(),
        username: "admin".into(),
        password: "pw".into(),
        insecure: false,
    });

    assert!(matches!(anonymous, Err(FlyError::ConfigValidation { .. })));
    assert_eq!(authed.unwrap(), b"ok");
    assert_eq!(fly.login.call_count(), 2);
}

#[test]
fn fake_api_client() {
    let client = FakeClient::new();
    client.pipelines.returns_on_call(
        1,
        vec![Pipeline {
            name: "web".into(),
            ..Default::default()
        }],
    );

    assert!(client.pipelines("main").unwrap().is_empty());
    assert_eq!(client.pipelines("main").unwrap()[0].name, "web");
    assert_eq!(client.invocations()["pipelines"].len(), 2);
}

#[test]
fn version_helpers() {
    assert!(versions_compatible("7.11.2", "7.4.0"));
    assert!(!versions_compatible("6.7.0", "7.0.0"));
    assert_eq!(Platform::new("amd64", "linux").query(), "arch=amd64&platform=linux");
}
