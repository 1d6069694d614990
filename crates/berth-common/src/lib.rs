//! # berth-common
//!
//! Shared error definitions, normalization options, and constants used
//! across the berth workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate.

pub mod config;
pub mod constants;
pub mod error;
