//! # NetAddr Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components used across
//! netaddr:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//!
//! ```rust
//! use netaddr::core::config; // For loading configuration
//! use netaddr::core::error::{NetAddrError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
