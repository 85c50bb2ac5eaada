//! # Baralga Infrastructure
//!
//! Impure code around the core activity model.
//!
//! This crate contains:
//! - Configuration loading (environment, TOML/JSON files)
//! - The properties-file settings store
//! - The single-instance lock file
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Depends on `baralga-domain` and `baralga-core`
//! - Contains all I/O; the core stays pure

pub mod config;
pub mod context;
pub mod errors;
pub mod instance_lock;
pub mod observability;
pub mod settings;

// Re-export commonly used items
pub use context::AppContext;
pub use errors::InfraError;
pub use instance_lock::InstanceLock;
pub use observability::init_tracing;
pub use settings::Settings;
