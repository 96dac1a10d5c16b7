//! # Core Runtime Module
//!
//! Provides the ambient infrastructure shared by the sync metadata core:
//! - Logging and tracing infrastructure
//! - Reconciler configuration
//!
//! ## Overview
//!
//! This crate holds what every reconciliation pass needs but that is not part
//! of the reconciliation rules themselves: which platform rules apply, how the
//! sync root separates paths, and where log events go.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ReconcilerConfig, ReconcilerConfigBuilder};
pub use error::{Error, Result};
