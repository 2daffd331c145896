#![forbid(unsafe_code)]
//! linkscope-core library.
//!
//! Plain-data inputs for the analysis engine ([`model`]), the tunable
//! thresholds it runs with ([`config`]), and the error vocabulary shared by
//! the workspace ([`error`]).
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums carrying a stable [`ErrorCode`];
//!   binaries wrap them in `anyhow`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;
pub mod timing;

pub use config::AnalysisConfig;
pub use error::{ConfigError, ErrorCode, SnapshotError};
pub use model::{Confidence, Edge, GraphSnapshot, Node};
