use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_strongbox"))
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let workspace = Self { dir };
        let config = format!(
            "[vault]\npath = \"{}\"\n\n[kdf]\nmemory_kib = 64\niterations = 1\nparallelism = 1\n",
            workspace.vault_path().to_string_lossy().replace('\\', "\\\\")
        );
        std::fs::write(workspace.config_path(), config).expect("write config");
        workspace
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn vault_path(&self) -> PathBuf {
        self.dir.path().join("vault.json")
    }

    fn command(&self, password: &str) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("STRONGBOX_CONFIG", self.config_path())
            .env("STRONGBOX_PASSWORD", password)
            .env("HOME", self.dir.path())
            .env_remove("STRONGBOX_PATH")
            .env_remove("STRONGBOX_LOG")
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("XDG_DATA_HOME");
        cmd
    }

    fn run(&self, password: &str, args: &[&str]) -> Output {
        self.command(password).args(args).output().expect("run strongbox")
    }

    fn run_with_stdin(&self, password: &str, args: &[&str], stdin: &str) -> Output {
        let mut child = self
            .command(password)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn strongbox");
        child
            .stdin
            .take()
            .expect("stdin")
            .write_all(stdin.as_bytes())
            .expect("write stdin");
        child.wait_with_output().expect("wait strongbox")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed: stdout={} stderr={}",
        stdout(output),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn list_json(workspace: &Workspace) -> Vec<serde_json::Value> {
    let output = workspace.run("correct", &["list", "--json"]);
    assert_success(&output);
    serde_json::from_str(&stdout(&output)).expect("list output should be JSON")
}

fn init(workspace: &Workspace) {
    let output = workspace.run("correct", &["init", "--name", "Personal"]);
    assert_success(&output);
    assert!(workspace.vault_path().exists());
}

fn add_bing(workspace: &Workspace) {
    let output = workspace.run(
        "correct",
        &[
            "add",
            "--name",
            "Bing",
            "--username",
            "a@outlook.com",
            "--secret",
            "helloworld123",
            "--url",
            "www.bing.ca",
            "--notes",
            "none",
        ],
    );
    assert_success(&output);
}

#[test]
fn test_init_add_list_show_remove_flow() {
    let workspace = Workspace::new();
    init(&workspace);
    add_bing(&workspace);

    let output = workspace.run_with_stdin(
        "correct",
        &["add", "--name", "Adobe", "--username", "a@outlook.com"],
        "goodpassword\n",
    );
    assert_success(&output);

    let records = list_json(&workspace);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Bing");
    assert_eq!(records[1]["name"], "Adobe");
    assert!(records[0].get("secret").is_none());

    let output = workspace.run("correct", &["show", "2", "--json", "--reveal"]);
    assert_success(&output);
    let shown: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("JSON");
    assert_eq!(shown["secret"], "goodpassword");

    let output = workspace.run("correct", &["show", "1"]);
    assert_success(&output);
    assert!(stdout(&output).contains("********"));
    assert!(!stdout(&output).contains("helloworld123"));

    let output = workspace.run("correct", &["remove", "1"]);
    assert_success(&output);

    let records = list_json(&workspace);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Adobe");
    assert_eq!(records[0]["number"], 1);
}

#[test]
fn test_vault_file_is_encrypted() {
    let workspace = Workspace::new();
    init(&workspace);
    add_bing(&workspace);

    let on_disk = std::fs::read_to_string(workspace.vault_path()).expect("read vault");
    assert!(on_disk.contains("\"Personal\""));
    for needle in ["Bing", "a@outlook.com", "helloworld123", "www.bing.ca"] {
        assert!(!on_disk.contains(needle), "found {} on disk", needle);
    }
}

#[test]
fn test_wrong_password_exit_code() {
    let workspace = Workspace::new();
    init(&workspace);
    add_bing(&workspace);

    let output = workspace.run("wrong", &["list"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_record_exit_code() {
    let workspace = Workspace::new();
    init(&workspace);

    let output = workspace.run("correct", &["show", "1"]);
    assert_eq!(output.status.code(), Some(3));

    let output = workspace.run("correct", &["remove", "0"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_missing_vault_exit_code() {
    let workspace = Workspace::new();
    let output = workspace.run("correct", &["list"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let workspace = Workspace::new();
    init(&workspace);

    let output = workspace.run("correct", &["init"]);
    assert_eq!(output.status.code(), Some(4));

    let output = workspace.run("other", &["init", "--force"]);
    assert_success(&output);
    assert_eq!(workspace.run("correct", &["list"]).status.code(), Some(5));
}

#[test]
fn test_empty_secret_rejected() {
    let workspace = Workspace::new();
    init(&workspace);

    let output = workspace.run("correct", &["add", "--name", "Empty", "--secret", ""]);
    assert_eq!(output.status.code(), Some(4));
    assert!(list_json(&workspace).is_empty());
}

#[test]
fn test_check_reports_summary() {
    let workspace = Workspace::new();
    init(&workspace);
    add_bing(&workspace);

    let output = workspace.run("correct", &["check"]);
    assert_success(&output);
    let text = stdout(&output);
    assert!(text.contains("Integrity check: OK"));
    assert!(text.contains("- records: 1"));
    assert!(text.contains("- name: Personal"));
}

#[test]
fn test_check_detects_corruption() {
    let workspace = Workspace::new();
    init(&workspace);
    add_bing(&workspace);

    let path: &Path = &workspace.vault_path();
    let json = std::fs::read_to_string(path).expect("read vault");
    std::fs::write(path, &json[..json.len() - 10]).expect("truncate vault");

    let output = workspace.run("correct", &["check"]);
    assert_eq!(output.status.code(), Some(6));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Integrity check: FAILED"));
    assert_eq!(stderr.matches("Invalid vault JSON").count(), 1);
}

#[test]
fn test_completions_generate() {
    let workspace = Workspace::new();
    let output = workspace.run("correct", &["completions", "bash"]);
    assert_success(&output);
    assert!(stdout(&output).contains("strongbox"));
}
