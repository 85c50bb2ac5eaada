//! User settings persisted between sessions
//!
//! Settings live in a flat key/value file inside the data directory. Every
//! setter saves immediately, so a crash never loses a stored filter.

pub mod properties;
pub mod store;

pub use store::Settings;
