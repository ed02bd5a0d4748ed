//! Observability
//!
//! Structured logging through `tracing`. Libraries only emit events; the
//! binary installs the subscriber once with [`init_logging`].

mod logging;

pub use logging::{build_filter, init_logging};
