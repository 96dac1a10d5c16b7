//! # Host Bridge Traits
//!
//! Contracts between the sync metadata core and the host it runs on.
//!
//! ## Overview
//!
//! The reconciliation core never touches the filesystem or the network. Every
//! fact it needs about the host is handed in through the types defined here:
//!
//! ### Platform Rules
//! - [`Platform`](platform::Platform) - Target filesystem rules (separator,
//!   case sensitivity, reserved characters and names, length limits)
//!
//! ### Filesystem Observations
//! - [`FileStat`](storage::FileStat) - The stat snapshot produced by the
//!   filesystem watcher for a single entry
//!
//! ### Logging
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//! - [`LogEntry`](time::LogEntry) / [`LogLevel`](time::LogLevel)
//!
//! ## Platform Injection
//!
//! Behavior that depends on the target filesystem is selected by passing a
//! [`Platform`](platform::Platform) value explicitly instead of branching on the
//! host OS. [`Platform::current`](platform::Platform::current) gives the host's
//! own rules when no override is wanted:
//!
//! ```
//! use bridge_traits::Platform;
//!
//! let target = Platform::Windows;
//! assert!(!target.is_case_sensitive());
//! assert_eq!(target.separator(), '\\');
//! ```
//!
//! ## Error Handling
//!
//! Host adapters report failures through [`BridgeError`](error::BridgeError).

pub mod error;
pub mod platform;
pub mod storage;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use platform::Platform;
pub use storage::FileStat;
pub use time::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
