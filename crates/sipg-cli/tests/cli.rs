//! End-to-end tests of the `sipg` binary against a mock search API.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "cli-test-key";

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("sipg").join("config.json")
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// The binary with an isolated credential file and no ambient key.
    fn sipg(&self, server: Option<&MockServer>) -> Command {
        let mut cmd = Command::cargo_bin("sipg").unwrap();
        cmd.env_remove("SHODAN_API_KEY")
            .env_remove("RUST_LOG")
            .env("SIPG_CONFIG", self.config_path())
            .arg("--no-color");
        if let Some(server) = server {
            cmd.env("SIPG_BASE_URL", server.uri());
        }
        cmd
    }

    fn stored(&self) -> Value {
        serde_json::from_str(&std::fs::read_to_string(self.config_path()).unwrap()).unwrap()
    }
}

fn page_body(total: u64, ips: &[&str]) -> Value {
    let matches: Vec<Value> = ips
        .iter()
        .map(|ip| {
            json!({
                "ip_str": ip,
                "port": 443,
                "org": "Example Org",
                "hostnames": ["a.example.com", "b.example.com", "c.example.com"],
                "location": {"city": "Dhaka", "country_name": "Bangladesh"},
                "data": "HTTP/1.1 200 OK"
            })
        })
        .collect();
    json!({ "total": total, "matches": matches })
}

async fn mount_page(server: &MockServer, page: u32, body: Value, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/shodan/host/search"))
        .and(query_param("key", KEY))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_api_info(server: &MockServer, status: u16) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({
            "plan": "dev",
            "query_credits": 100,
            "scan_credits": 5,
            "monitored_ips": 16,
            "unlocked": true
        }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({"error": "Invalid API key"}))
    };
    Mock::given(method("GET"))
        .and(path("/api-info"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn refs(v: &[String]) -> Vec<&str> {
    v.iter().map(String::as_str).collect()
}

fn lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_no_arguments_prints_banner() {
    let env = Env::new();
    env.sipg(None)
        .assert()
        .success()
        .stdout(predicate::str::contains("Use 'sipg --help' to see available commands."));
}

#[test]
fn test_examples_lists_queries() {
    let env = Env::new();
    env.sipg(None)
        .arg("examples")
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Search Queries:"))
        .stdout(predicate::str::contains("sipg search 'http.status:200'"));
}

#[test]
fn test_search_without_key_asks_to_configure() {
    let env = Env::new();
    env.sipg(None)
        .args(["search", "port:80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sipg configure"));
}

#[test]
fn test_search_rejects_zero_max_results() {
    let env = Env::new();
    env.sipg(None)
        .args(["search", "port:80", "-m", "0"])
        .assert()
        .failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_prints_and_saves_ipv4_only() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        page_body(4, &["1.1.1.1", "2001:db8::1", "999.1.1.1", "9.9.9.9"]),
        1,
    )
    .await;

    let env = Env::new();
    let output = env.path("ips.txt");

    env.sipg(Some(&server))
        .args(["--api-key", KEY, "search", "port:443", "-d", "0", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. https://1.1.1.1\n2. https://9.9.9.9\n"))
        .stdout(predicate::str::contains("Search completed! Found 2 results."))
        .stderr(predicate::str::contains("Found 4 total results"));

    assert_eq!(lines(&output), vec!["https://1.1.1.1", "https://9.9.9.9"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_walks_pages_until_cap() {
    let server = MockServer::start().await;
    let page1: Vec<String> = (0..100).map(|i| format!("10.0.0.{}", i % 250)).collect();
    let page2: Vec<String> = (0..100).map(|i| format!("10.0.1.{}", i % 250)).collect();

    mount_page(&server, 1, page_body(250, &refs(&page1)), 1).await;
    mount_page(&server, 2, page_body(250, &refs(&page2)), 1).await;
    mount_page(&server, 3, page_body(250, &["10.0.2.1"]), 0).await;

    let env = Env::new();
    let output = env.path("capped.txt");

    env.sipg(Some(&server))
        .args(["--api-key", KEY, "search", "org:Example", "-m", "120", "-d", "0", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("120. https://10.0.1.19\n"))
        .stdout(predicate::str::contains("Search completed! Found 120 results."));

    assert_eq!(lines(&output).len(), 120);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_failure_mid_walk_keeps_saved_lines() {
    let server = MockServer::start().await;
    let page1: Vec<String> = (0..100).map(|i| format!("10.0.0.{i}")).collect();
    mount_page(&server, 1, page_body(250, &refs(&page1)), 1).await;
    Mock::given(method("GET"))
        .and(path("/shodan/host/search"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"error": "Service unavailable"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, 3, page_body(250, &["10.0.2.1"]), 0).await;

    let env = Env::new();
    let output = env.path("partial.txt");

    env.sipg(Some(&server))
        .args(["--api-key", KEY, "search", "port:443", "-d", "0", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stdout(predicate::str::contains("100. https://10.0.0.99\n"))
        .stdout(predicate::str::contains("Search completed!").not())
        .stderr(predicate::str::contains("Service unavailable"));

    let saved = lines(&output);
    assert_eq!(saved.len(), 100);
    assert_eq!(saved[0], "https://10.0.0.0");
    assert_eq!(saved[99], "https://10.0.0.99");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_page_range_fetches_only_requested_pages() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(450, &["10.0.0.1"]), 1).await;
    mount_page(&server, 2, page_body(450, &["10.0.2.1"]), 0).await;
    mount_page(&server, 3, page_body(450, &["10.0.3.1", "10.0.3.2"]), 1).await;
    mount_page(&server, 4, page_body(450, &["10.0.4.1"]), 1).await;
    mount_page(&server, 5, page_body(450, &["10.0.5.1"]), 0).await;

    let env = Env::new();
    let output = env.path("range.txt");

    env.sipg(Some(&server))
        .args([
            "--api-key", KEY, "search", "port:443", "--start-page", "3", "--end-page", "4", "-d",
            "0", "-o",
        ])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. https://10.0.3.1\n"))
        .stdout(predicate::str::contains("Search completed! Found 3 results."));

    assert_eq!(
        lines(&output),
        vec!["https://10.0.3.1", "https://10.0.3.2", "https://10.0.4.1"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_inverted_page_range_only_probes() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(450, &["10.0.0.1"]), 1).await;
    mount_page(&server, 2, page_body(450, &["10.0.2.1"]), 0).await;
    mount_page(&server, 3, page_body(450, &["10.0.3.1"]), 0).await;

    let env = Env::new();
    env.sipg(Some(&server))
        .args(["--api-key", KEY, "search", "port:443", "--start-page", "3", "--end-page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Search completed! Found 0 results."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_details_and_table() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(1, &["5.6.7.8"]), 2).await;

    let env = Env::new();
    let output = env.path("details.jsonl");

    env.sipg(Some(&server))
        .args(["--api-key", KEY, "search", "port:443", "--details", "-d", "0", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Result 1:"))
        .stdout(predicate::str::contains("Location: Dhaka, Bangladesh"))
        .stdout(predicate::str::contains("Hostnames: a.example.com, b.example.com, c.example.com"));

    let saved: Vec<Value> = lines(&output)
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["ip"], "5.6.7.8");
    assert_eq!(saved[0]["port"], 443);
    assert_eq!(saved[0]["data"], "HTTP/1.1 200 OK");

    env.sipg(Some(&server))
        .args(["--api-key", KEY, "search", "port:443", "--table", "-d", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shodan Search Results"))
        .stdout(predicate::str::contains("a.example.com, b.example.com (+1 more)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_with_no_results() {
    let server = MockServer::start().await;
    mount_page(&server, 1, page_body(0, &[]), 1).await;

    let env = Env::new();
    env.sipg(Some(&server))
        .args(["--api-key", KEY, "search", "nothing:here"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No results found for the given query."))
        .stdout(predicate::str::contains("Search completed! Found 0 results."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_reports_invalid_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shodan/host/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let env = Env::new();
    env.sipg(Some(&server))
        .args(["--api-key", "wrong", "search", "port:80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid API key"))
        .stderr(predicate::str::contains("wrong").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_configure_then_info_then_clear() {
    let server = MockServer::start().await;
    mount_api_info(&server, 200).await;

    let env = Env::new();
    env.sipg(Some(&server))
        .args(["configure", KEY])
        .assert()
        .success()
        .stdout(predicate::str::contains("API key configured successfully!"))
        .stdout(predicate::str::contains("Plan: dev"));
    assert_eq!(env.stored(), json!({"api_key": KEY}));

    env.sipg(Some(&server))
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shodan API Information:"))
        .stdout(predicate::str::contains("Query credits: 100"));

    let assert = env.sipg(Some(&server)).args(["info", "--json"]).assert().success();
    let raw: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(raw["plan"], "dev");
    assert_eq!(raw["unlocked"], true);
    assert!(raw.get("usage_limits").is_none());

    env.sipg(None)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("API key cleared successfully!"));
    assert_eq!(env.stored(), json!({}));

    env.sipg(None)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("No API key was stored."));
}

#[test]
fn test_configure_does_not_persist_environment_key() {
    let env = Env::new();
    env.sipg(None)
        .env("SHODAN_API_KEY", "from-environment")
        .arg("configure")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read API key"));

    assert!(!env.config_path().exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_configure_keeps_key_when_verification_fails() {
    let server = MockServer::start().await;
    mount_api_info(&server, 401).await;

    let env = Env::new();
    env.sipg(Some(&server))
        .args(["configure", "bad-key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to verify API key"));

    assert_eq!(env.stored(), json!({"api_key": "bad-key"}));
}
