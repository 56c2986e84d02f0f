//! # NetAddr Library Root
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Discovers the addresses bound to the local host and packages them into a
//! switchable endpoint descriptor (`main address + alternates + port`).
//!
//! - `common::network::discovery` - interface enumeration and filtering
//! - `common::network::endpoint` - the `Endpoint` record
//! - `core` - configuration and error types
//! - `commands` - handlers behind the `netaddr` binary
//!

pub mod commands; // Handles specific command logic (discover, endpoint)
pub mod common; // Contains shared utilities (network)
pub mod core; // Core infrastructure (errors, config)
