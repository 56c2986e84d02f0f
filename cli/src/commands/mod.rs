//! # NetAddr Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the `netaddr` CLI so the
//! entry point (`main.rs`) can route to them.
//!
//! ## Commands
//!
//! - `discover`: Print the host's global unicast addresses
//! - `endpoint`: Build an endpoint record and print its rendered form
//!
//! Each command defines its own arguments structure and handler function.
//!

/// Prints every discovered address, one per line.
pub mod discover;
/// Builds an `Endpoint`, applies additions/selection and prints it.
pub mod endpoint;
