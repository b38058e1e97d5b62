//! Configuration management for premark.
//!
//! premark has a single optional configuration layer, the user-wide
//! [`GlobalConfig`] file. Command-line flags are layered on top of it by the
//! CLI: `--var` overrides `[vars]`, `--config` replaces the file location.

mod global;

pub use global::GlobalConfig;
