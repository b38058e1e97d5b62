//! Document resolvers: the capability that maps a path to raw document text.
//!
//! The compiler never touches storage itself. Every `extends` parent, `@`
//! variable value, and transclusion target is fetched through a
//! [`DocumentResolver`] supplied by the caller.
//!
//! Two implementations ship with the crate:
//! - [`FileResolver`] - reads files relative to a base directory
//! - [`MemoryResolver`] - exact-match lookup in an in-memory map, used by tests
//!
//! # Contract
//!
//! - A missing path fails with [`PremarkError::DocumentNotFound`](crate::core::PremarkError::DocumentNotFound).
//! - Implementations must tolerate concurrent calls: independent compilations
//!   may share one resolver.
//! - Timeouts and retries, if any, are the resolver's own business.

mod file;
mod memory;

pub use file::FileResolver;
pub use memory::MemoryResolver;

use std::future::Future;
use std::sync::Arc;

use crate::core::Result;

/// Asynchronously resolve a document path to its raw text.
pub trait DocumentResolver: Send + Sync {
    /// Fetch the raw text stored at `path`.
    fn resolve(&self, path: &str) -> impl Future<Output = Result<String>> + Send;
}

impl<R: DocumentResolver> DocumentResolver for &R {
    fn resolve(&self, path: &str) -> impl Future<Output = Result<String>> + Send {
        (**self).resolve(path)
    }
}

impl<R: DocumentResolver> DocumentResolver for Arc<R> {
    fn resolve(&self, path: &str) -> impl Future<Output = Result<String>> + Send {
        (**self).resolve(path)
    }
}
