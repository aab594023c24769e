use std::env;
use std::process::Command;

/// Cargo options shared by the build, test and bench commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub features: Vec<String>,
    pub release: bool,
}

impl BuildConfig {
    /// Join features into a single string suitable for passing to cargo.
    pub fn features_arg(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.join(" "))
        }
    }

    fn apply(&self, cmd: &mut Command) {
        if let Some(f) = self.features_arg() {
            cmd.arg("--features").arg(f);
        }
        if self.release {
            cmd.arg("--release");
        }
    }
}

/// Read extra features from `HAARSTREAM_FEATURES` and the release flag from
/// `HAARSTREAM_RELEASE`.
pub fn detect_config() -> BuildConfig {
    let extra = env::var("HAARSTREAM_FEATURES").unwrap_or_default();
    let release = env::var("HAARSTREAM_RELEASE").unwrap_or_default();
    compute_config(&extra, &release)
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
pub fn compute_config(extra: &str, release: &str) -> BuildConfig {
    let mut features: Vec<String> = Vec::new();
    for feat in extra.split([' ', ',']) {
        let feat = feat.trim();
        if !feat.is_empty() && !features.iter().any(|f| f == feat) {
            features.push(feat.to_string());
        }
    }
    let release = matches!(release.trim(), "1" | "true" | "yes");
    BuildConfig { features, release }
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["build", "--workspace"]);
    cfg.apply(&mut cmd);
    cmd
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["test", "--workspace"]);
    cfg.apply(&mut cmd);
    cmd
}

/// Library tests without `std`, covering the engine and buffer alone.
pub fn test_no_std_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["test", "-p", "haarstream", "--lib", "--no-default-features"]);
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["clippy", "--workspace", "--all-targets", "--all-features"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["fmt", "--all"]);
    cmd
}

pub fn bench_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["bench", "-p", "haarstream-bench"]);
    cmd
}

/// Run the binary on `input` through cargo.
pub fn transform_command(cfg: &BuildConfig, input: &str) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "-p", "haarstream-cli"]);
    cfg.apply(&mut cmd);
    cmd.args(["--", input]);
    cmd
}
