//! Injects `ACCOUNT_VERSION` for `account version`.
use std::process::Command;

fn main() {
    // A release pipeline can pin the version; local builds use git describe.
    if let Ok(version) = std::env::var("ACCOUNT_VERSION") {
        println!("cargo:rustc-env=ACCOUNT_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=ACCOUNT_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=ACCOUNT_VERSION");
}
