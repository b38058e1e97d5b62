//! Integration test suite for premark
//!
//! End-to-end tests covering the compilation pipeline through real resolvers
//! and the `premark` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: Library compilation scenarios (extends, vars, includes together)
//! - **cli**: Binary behavior (stdin, `--var`, `--output`, exit codes)
//! - **configuration**: Global config file handling

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod configuration;
mod pipeline;
