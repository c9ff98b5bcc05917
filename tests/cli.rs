//
//  yacargo
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

struct TestEnv {
    tmp: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("yacargo").unwrap();
        cmd.env("HOME", self.tmp.path())
            .env("YACARGO_CONFIG", self.tmp.path().join("config.toml"))
            .env_remove("YACARGO_TOKEN")
            .env_remove("YACARGO_BASE_URL")
            .env_remove("YACARGO_TEST_SERVER")
            .env_remove("YACARGO_DEBUG");
        cmd
    }
}

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("claim"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("performer"));
}

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_config_set_get_list() {
    let env = TestEnv::new();
    env.cmd().args(["config", "set", "test_server", "true"]).assert().success();
    env.cmd()
        .args(["config", "get", "test_server"])
        .assert()
        .success()
        .stdout("true\n");

    let out = env
        .cmd()
        .args(["--json", "config", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let config: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(config["test_server"], Value::Bool(true));
    assert_eq!(config["output"], "table");

    env.cmd()
        .args(["config", "set", "editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_invalid_cancel_state_is_usage_error() {
    let env = TestEnv::new();
    env.cmd()
        .args(["claim", "cancel", "abc", "--version", "1", "--state", "later", "--token", "t"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid parameter"));
}

#[test]
fn test_claim_create_rejects_malformed_file() {
    let env = TestEnv::new();
    let file = env.tmp.path().join("claim.json");
    std::fs::write(&file, "{not json").unwrap();
    env.cmd()
        .args(["claim", "create", "--token", "t", "--file"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid claim JSON"));
}

#[test]
fn test_claim_info_against_server() {
    let env = TestEnv::new();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/b2b/cargo/integration/v2/claims/info")
        .match_query(mockito::Matcher::UrlEncoded("claim_id".into(), "abc".into()))
        .match_header("authorization", "Bearer t")
        .with_status(200)
        .with_body(r#"{"id": "abc", "status": "performer_found", "version": 2}"#)
        .create();

    let out = env
        .cmd()
        .args(["--json", "--token", "t", "--base-url"])
        .arg(server.url())
        .args(["claim", "info", "abc"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let claim: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(claim["id"], "abc");
    assert_eq!(claim["status"], "performer_found");
    mock.assert();
}

#[test]
fn test_not_found_exit_code() {
    let env = TestEnv::new();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/b2b/cargo/integration/v2/claims/info")
        .match_query(mockito::Matcher::Any)
        .with_status(404)
        .with_body(r#"{"code": "not_found", "message": "Claim not found"}"#)
        .create();

    env.cmd()
        .args(["--token", "t", "--base-url"])
        .arg(server.url())
        .args(["claim", "info", "missing"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("not_found"));
}

#[test]
fn test_claim_create_reports_warnings() {
    let env = TestEnv::new();
    let file = env.tmp.path().join("claim.json");
    std::fs::write(
        &file,
        r#"{
            "items": [{"pickup_point": 1, "droppof_point": 2, "title": "Box",
                       "cost_value": 100.0, "cost_currency": "RUB", "quantity": 1}],
            "route_points": [
                {"point_id": 1, "visit_order": 1, "type": "source",
                 "contact": {"name": "Rick", "phone": "+79000000000"},
                 "address": {"fullname": "Moscow", "coordinates": [37.6, 55.7]}},
                {"point_id": 2, "visit_order": 2, "type": "destination",
                 "contact": {"name": "Morty", "phone": "+79000000001"},
                 "address": {"fullname": "Moscow", "coordinates": [37.7, 55.8]}}
            ],
            "emergency_contact_name": "Rick",
            "emergency_contact_phone": "+79000000000"
        }"#,
    )
    .unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/b2b/cargo/integration/v2/claims/create")
        .match_query(mockito::Matcher::UrlEncoded("request_id".into(), "req-1".into()))
        .with_status(200)
        .with_body(
            r#"{"id": "abc", "status": "new", "version": 1,
                "warnings": [{"source": "client_requirements", "code": "not_fit_in_car", "message": "too big"}]}"#,
        )
        .create();

    env.cmd()
        .args(["--json", "--token", "t", "--base-url"])
        .arg(server.url())
        .args(["claim", "create", "--request-id", "req-1", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"abc\""))
        .stderr(predicate::str::contains("warning: not_fit_in_car: too big"));
    mock.assert();
}
