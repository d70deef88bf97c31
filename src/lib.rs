//! example-registry - static registry of examples for test drivers
//!
//! Lists the example programs a test driver should build and run, and which
//! of those runs go through a memory checker. The registry is immutable once
//! loaded and can be read from any number of threads.

pub mod catalog;
pub mod cli;
pub mod error;
pub mod legacy;
pub mod output;

pub use catalog::{CompiledExample, ExampleEntry, ExampleKind, ExampleRegistry, ScriptExample};
pub use error::RegistryError;
