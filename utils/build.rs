//! Emits `BUILD_DATE` (RFC3339, UTC) and `BUILD_COMMIT` for `version_info`.
//!
//! `SOURCE_DATE_EPOCH` pins the date for reproducible builds.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, SecondsFormat, Utc};

fn main() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let date = source_date_epoch().unwrap_or_else(Utc::now);
    println!(
        "cargo:rustc-env=BUILD_DATE={}",
        date.to_rfc3339_opts(SecondsFormat::Secs, true)
    );

    let workspace = workspace_root();
    let commit = short_commit(&workspace).unwrap_or_else(|| "unknown".to_owned());
    println!("cargo:rustc-env=BUILD_COMMIT={commit}");

    let head = workspace.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }
}

fn source_date_epoch() -> Option<DateTime<Utc>> {
    let secs = env::var("SOURCE_DATE_EPOCH").ok()?.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0)
}

/// `utils/` sits directly under the workspace root.
fn workspace_root() -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_owned());
    let manifest_dir = PathBuf::from(manifest_dir);
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

fn short_commit(workspace: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let commit = String::from_utf8(output.stdout).ok()?.trim().to_owned();
    (!commit.is_empty()).then_some(commit)
}
