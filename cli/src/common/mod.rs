//! # NetAddr Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! Shared utility modules used by the command handlers and by library users.
//! Command-specific logic lives in `commands::`, core infrastructure
//! (configuration, errors) in `core::`.
//!
//! - **`network`**: Local address discovery and the switchable `Endpoint` record.
//!

/// Local address discovery and endpoint descriptors.
pub mod network;
