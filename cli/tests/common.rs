//! # NetAddr CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration test files. Each `.rs` file in
//! `cli/tests/` is compiled as a separate test crate running the `netaddr`
//! binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// # Get NetAddr Command (`netaddr_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `netaddr` binary.
///
/// ## Panics
/// Panics if the `netaddr` binary cannot be found via `Command::cargo_bin`.
pub fn netaddr_cmd() -> Command {
    Command::cargo_bin("netaddr").expect("Failed to find netaddr binary for testing")
}

/// # Isolated Command (`isolated_cmd`)
///
/// Like [`netaddr_cmd`], but runs inside `workdir` with the user config
/// directory pointed into it, so no real configuration file is picked up.
/// `workdir` gets a `.git` directory to stop the project config search there.
pub fn isolated_cmd(workdir: &TempDir) -> Command {
    fs::create_dir_all(workdir.path().join(".git")).expect("Failed to create .git marker");
    let mut cmd = netaddr_cmd();
    cmd.current_dir(workdir.path())
        .env("HOME", workdir.path())
        .env("XDG_CONFIG_HOME", workdir.path().join(".config"))
        .env_remove("NETADDR_PORT")
        .env_remove("RUST_LOG");
    cmd
}
