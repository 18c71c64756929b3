use std::path::{Path, PathBuf};
use std::process::Output;

use tempfile::TempDir;
use tokio::process::Command;

/// An isolated HOME so profiles never touch the real data directory.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("home")).unwrap();
        Self { dir }
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    pub fn profile_path(&self) -> PathBuf {
        self.home().join("data").join("dataverse").join("profile.json")
    }

    /// Write a file under the sandbox and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Client settings without request retries or readiness waits.
    pub fn fast_config(&self) -> PathBuf {
        self.write(
            "config.json",
            r#"{"http_retries": 0, "readiness_delays_secs": [0, 0, 0]}"#,
        )
    }

    /// Run the CLI with no connection settings in the environment.
    pub async fn run(&self, args: &[&str]) -> Output {
        run_cli_with_env(args, &self.home()).await
    }

    /// Run the CLI and expect success, returning stdout.
    pub async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI and expect failure, returning stderr.
    pub async fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if output.status.success() {
            panic!("CLI command should have failed: {:?}", args);
        }
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

/// Run the CLI binary with a custom HOME directory.
pub async fn run_cli_with_env(args: &[&str], home: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dataverse"))
        .args(args)
        .env("HOME", home)
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("DATAVERSE_URL")
        .env_remove("DATAVERSE_TOKEN")
        .env_remove("DATAVERSE_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Parse stdout as one JSON value per line.
pub fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("stdout line is not JSON"))
        .collect()
}

pub fn guid(n: usize) -> String {
    format!("00000000-0000-0000-0000-{:012}", n)
}
