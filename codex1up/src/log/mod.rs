//! Logging abstraction layer.
//!
//! Installer steps never print directly. They receive an `Arc<dyn Logger>`
//! through the [`InstallerContext`](crate::context::InstallerContext) and
//! report progress through it, which lets the CLI decide how lines are
//! rendered and lets tests assert on what a dry run *would* have done.
//!
//! # Architecture
//!
//! - `Logger` trait: the interface every step logs through
//! - `TracingLogger`: forwards to the `tracing` crate (log file)
//! - `NoOpLogger`: discards everything
//! - `MemoryLogger`: records lines for assertions
//!
//! # Usage
//!
//! ```
//! use codex1up::log::{Logger, NoOpLogger};
//! use codex1up::{log_info, log_ok};
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! log_info!(logger, "Writing {}", "config.toml");
//! log_ok!(logger, "Done");
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::MemoryLogger;
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
