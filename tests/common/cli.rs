use assert_cmd::Command;
use std::path::PathBuf;
use std::process::ExitStatus;
use tempfile::TempDir;

/// Isolated working directory with its own `HOME`, so no real config leaks in.
pub struct RwWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl RwWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Write `.roadwatch/config.yaml` in the workspace.
    pub fn write_config(&self, yaml: &str) {
        let dir = self.root.join(".roadwatch");
        std::fs::create_dir_all(&dir).expect("config dir");
        std::fs::write(dir.join("config.yaml"), yaml).expect("write config");
    }
}

pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

pub fn rw_command(workspace: &RwWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("rw").expect("rw binary");
    cmd.current_dir(&workspace.root)
        .env("HOME", &workspace.root)
        .env_remove("RUST_LOG")
        .env_remove("ROADWATCH_USER")
        .env_remove("ROADWATCH_DEFAULT_TYPE")
        .env_remove("ROADWATCH_DEFAULT_SEVERITY")
        .env_remove("ROADWATCH_ID_PREFIX")
        .env_remove("ROADWATCH_IMAGE_MAX_BYTES")
        .env_remove("ROADWATCH_LOG_JSON");
    cmd
}

pub fn run_rw<I, S>(workspace: &RwWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = rw_command(workspace)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to run rw: {e}"));
    RunOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
