//! Core types shared by every premark module.
//!
//! - [`PremarkError`] - the error enum returned by library operations
//! - [`ErrorContext`] - user-facing wrapper with details and a suggestion
//! - [`user_friendly_error`] - conversion used by the CLI before printing

pub mod error;

pub use error::{ErrorContext, PremarkError, Result, user_friendly_error};
