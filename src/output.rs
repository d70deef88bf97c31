//! Rendering of registry listings for `list` and `convert`

use crate::catalog::{format_flag, ExampleEntry, ExampleKind, ExampleRegistry};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::legacy;
use std::io::{self, Write};

/// Render a registry in the requested format
pub fn render(registry: &ExampleRegistry, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(registry.entries())),
        OutputFormat::Json => {
            let mut json = registry.to_json_string()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Toml => registry.to_toml_string(),
        OutputFormat::Legacy => Ok(legacy::render(registry)),
    }
}

/// One aligned line per entry: kind, run flag, memcheck flag, invocation
///
/// Script entries show `-` in the memcheck column.
pub fn render_text(entries: &[ExampleEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let memcheck = match entry {
            ExampleEntry::Compiled(e) => format_flag(e.do_valgrind_run),
            ExampleEntry::Script(_) => "-",
        };
        out.push_str(&format!(
            "{:<8}  run={:<5}  memcheck={:<5}  {}\n",
            entry.kind(),
            format_flag(entry.should_run()),
            memcheck,
            entry.invocation()
        ));
    }
    out
}

/// Write rendered output and flush it
///
/// A closed reader (e.g. `| head -1`) surfaces as an `io::Error`.
pub fn write_output<W: Write>(mut writer: W, text: &str) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

/// Entry counts shown by `summary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub compiled: usize,
    pub script: usize,
    pub runnable: usize,
    pub memcheck: usize,
}

impl Summary {
    pub fn of(registry: &ExampleRegistry) -> Self {
        Self {
            total: registry.len(),
            compiled: registry.by_kind(ExampleKind::Compiled).count(),
            script: registry.by_kind(ExampleKind::Script).count(),
            runnable: registry.runnable().count(),
            memcheck: registry.memory_checked().count(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "total:    {}\ncompiled: {}\nscript:   {}\nrunnable: {}\nmemcheck: {}\n",
            self.total, self.compiled, self.script, self.runnable, self.memcheck
        )
    }
}
