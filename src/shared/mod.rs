//! Cross-cutting helpers: retry with backoff, graceful shutdown

pub mod retry;
pub mod shutdown;

pub use retry::{retry_with_backoff, RetryConfig};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
