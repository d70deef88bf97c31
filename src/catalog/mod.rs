// Example-run registry
//
// Holds the examples a test driver builds and runs to keep them working over
// time, each with a run flag and (for compiled examples) a memory-checker
// flag. Compiled and script examples share one ordered sequence of tagged
// entries; the built-in listing is embedded from examples-to-run.toml.

mod entry;
pub mod flag;
mod registry;

pub use entry::{CompiledExample, ExampleEntry, ExampleKind, Invocation, ScriptExample};
pub use flag::{format_flag, parse_flag};
pub use registry::ExampleRegistry;
