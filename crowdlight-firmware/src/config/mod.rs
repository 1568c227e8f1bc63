//! Configuration persistence

pub mod loader;

pub use loader::{ConfigPersistence, LoadError};
