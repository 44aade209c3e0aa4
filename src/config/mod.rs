//! Configuration file support
//!
//! - `loader`: configuration file discovery and parsing

pub mod loader;

#[cfg(test)]
mod tests;

pub use loader::{Config, ConfigV1};
