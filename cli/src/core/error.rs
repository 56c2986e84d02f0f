//! # NetAddr Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout netaddr. Library
//! operations (`discover`, `Endpoint::new`) return the typed [`NetAddrError`]
//! so callers can tell the failure kinds apart, while the application layer
//! (configuration loading and command handlers) uses `anyhow` for context.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `NetAddrError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The two discovery-related variants are deliberately separate:
//! - `Discovery`: the operating system refused to enumerate interfaces or
//!   their addresses. This is a system malfunction.
//! - `NoAddress`: enumeration worked but no global unicast address was
//!   found, which is normal on an isolated or offline host.
//!
//! ## Examples
//!
//! ```rust
//! use netaddr::common::network::endpoint::Endpoint;
//! use netaddr::core::error::NetAddrError;
//!
//! match Endpoint::new(2466) {
//!     Ok(endpoint) => println!("dial {}", endpoint),
//!     Err(NetAddrError::NoAddress) => println!("host is offline"),
//!     Err(e) => eprintln!("discovery failed: {}", e),
//! }
//! ```
//!
use std::io;
use thiserror::Error;

/// Custom error type for netaddr.
// No PartialEq: io::Error does not implement it.
#[derive(Error, Debug)]
pub enum NetAddrError {
    #[error("Network interface enumeration failed: {source}")]
    Discovery {
        #[from]
        source: io::Error,
    },

    #[error("no address found")]
    NoAddress,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result using anyhow::Error for the application layer.
pub type Result<T> = anyhow::Result<T>;
