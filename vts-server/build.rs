//! Build script for vts-server
//!
//! Exposes build identification to the startup log and `/health`:
//! - `VTS_GIT_HASH`: short commit hash, or "unknown" outside a git checkout
//! - `VTS_BUILD_TIMESTAMP`: RFC 3339 build time
//! - `VTS_BUILD_PROFILE`: cargo profile (debug/release)

use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn main() {
    let git_hash = git_short_hash().unwrap_or_else(|| "unknown".to_string());
    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=VTS_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=VTS_BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=VTS_BUILD_PROFILE={}", profile);

    // No rerun-if-changed directives: rerun every build so the hash stays current
}
