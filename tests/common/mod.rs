use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use mockito::{Mock, Server, ServerGuard};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const TEST_KEY: &str = "test-key-123";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub server: ServerGuard,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        Self {
            _tmp: tmp,
            home,
            server: Server::new(),
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/api/v1", self.server.url())
    }

    /// Binary with an isolated HOME and no ambient API settings.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ecrime");
        cmd.env("HOME", &self.home)
            .env_remove("ECRIME_API_KEY")
            .env_remove("ECRIME_API_URL")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Binary pointed at the mock server with a valid key.
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.env("ECRIME_API_KEY", TEST_KEY)
            .env("ECRIME_API_URL", self.api_url());
        cmd
    }

    /// Expects one authenticated GET on `path` answering `body`.
    pub fn mock_get(&mut self, path: &str, body: serde_json::Value) -> Mock {
        self.server
            .mock("GET", format!("/api/v1{}", path).as_str())
            .match_header("x-api-key", TEST_KEY)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create()
    }

    pub fn write_config(&self, contents: &str) {
        let path = self.home.join(".config/ecrime/config.toml");
        fs::create_dir_all(path.parent().expect("config parent")).expect("create config dir");
        fs::write(path, contents).expect("write config");
    }

    pub fn stdout_of(&self, args: &[&str]) -> String {
        let out = self
            .cmd()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(out).expect("utf8 stdout")
    }
}
