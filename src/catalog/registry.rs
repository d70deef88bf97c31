use crate::catalog::{CompiledExample, ExampleEntry, ExampleKind, ScriptExample};
use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

const BUILTIN_TOML: &str = include_str!("../../examples-to-run.toml");

static SHARED: OnceLock<ExampleRegistry> = OnceLock::new();

/// On-disk layout: a flat array of `[[example]]` tables
#[derive(Debug, Default, Deserialize, Serialize)]
struct RegistryFile {
    #[serde(default, rename = "example", skip_serializing_if = "Vec::is_empty")]
    examples: Vec<ExampleEntry>,
}

/// Ordered, read-only list of example-run descriptors
///
/// Entries keep the order they were written in. Nothing is deduplicated and
/// entry contents are never validated; only structural problems fail a load.
///
/// # Example Usage
/// ```
/// use example_registry::catalog::ExampleRegistry;
///
/// let registry = ExampleRegistry::builtin()?;
/// for example in registry.compiled().filter(|e| e.do_run) {
///     println!("{} (memcheck: {})", example.invocation, example.do_valgrind_run);
/// }
/// # Ok::<(), example_registry::RegistryError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleRegistry {
    entries: Vec<ExampleEntry>,
}

impl ExampleRegistry {
    pub fn from_entries(entries: Vec<ExampleEntry>) -> Self {
        Self { entries }
    }

    /// Parse the registry embedded in the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_TOML)
    }

    /// Process-wide built-in registry, parsed on first use
    ///
    /// Safe to call from any thread. Racing first callers may each parse,
    /// but only one result is kept.
    pub fn shared() -> Result<&'static ExampleRegistry> {
        if let Some(registry) = SHARED.get() {
            return Ok(registry);
        }
        let registry = Self::builtin()?;
        Ok(SHARED.get_or_init(|| registry))
    }

    /// Load a registry from a TOML file
    ///
    /// # Example TOML
    /// ```toml
    /// [[example]]
    /// kind = "compiled"
    /// invocation = "main-packet-header"
    /// do_run = true
    /// do_valgrind_run = true
    ///
    /// [[example]]
    /// kind = "script"
    /// invocation = "sample-simulator.py"
    /// do_run = "True"
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading example registry");
        let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RegistryFile = toml::from_str(content)?;
        debug!(entries = file.examples.len(), "parsed example registry");
        Ok(Self::from_entries(file.examples))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let file = RegistryFile {
            examples: self.entries.clone(),
        };
        Ok(toml::to_string(&file)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// All entries in registry order
    pub fn entries(&self) -> &[ExampleEntry] {
        &self.entries
    }

    pub fn compiled(&self) -> impl Iterator<Item = &CompiledExample> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            ExampleEntry::Compiled(example) => Some(example),
            ExampleEntry::Script(_) => None,
        })
    }

    pub fn scripts(&self) -> impl Iterator<Item = &ScriptExample> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            ExampleEntry::Script(example) => Some(example),
            ExampleEntry::Compiled(_) => None,
        })
    }

    pub fn by_kind(&self, kind: ExampleKind) -> impl Iterator<Item = &ExampleEntry> + '_ {
        self.entries.iter().filter(move |entry| entry.kind() == kind)
    }

    /// Entries the driver should execute
    pub fn runnable(&self) -> impl Iterator<Item = &ExampleEntry> + '_ {
        self.entries.iter().filter(|entry| entry.should_run())
    }

    /// Entries flagged for the memory checker
    pub fn memory_checked(&self) -> impl Iterator<Item = &ExampleEntry> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.should_run_under_memory_checker())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
