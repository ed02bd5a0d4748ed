//! Background scheduling
//!
//! The alert poller is the only background task. It follows the runtime
//! rules of the workspace:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support
//! - Timeout wrapping on all async operations

pub mod alert_poller;
pub mod error;

pub use alert_poller::{AlertPoller, AlertPollerConfig, PollerStats};
pub use error::{SchedulerError, SchedulerResult};
