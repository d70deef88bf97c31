use crate::catalog::flag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Toolchain category of an example
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExampleKind {
    /// Program built from source
    Compiled,
    /// Interpreted script
    Script,
}

impl fmt::Display for ExampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExampleKind::Compiled => f.pad("compiled"),
            ExampleKind::Script => f.pad("script"),
        }
    }
}

/// Compiled example descriptor
///
/// # Example TOML
/// ```toml
/// [[example]]
/// kind = "compiled"
/// invocation = "red_vs_ared --queueType=ARED"
/// do_run = true
/// do_valgrind_run = true
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CompiledExample {
    /// Example name, optionally followed by command-line arguments
    pub invocation: String,

    /// Whether the driver should execute this example
    #[serde(deserialize_with = "flag::deserialize")]
    pub do_run: bool,

    /// Whether the run should also go through the memory checker
    ///
    /// Only meaningful when `do_run` is true. Not enforced here.
    #[serde(deserialize_with = "flag::deserialize")]
    pub do_valgrind_run: bool,
}

impl CompiledExample {
    pub fn new(invocation: impl Into<String>, do_run: bool, do_valgrind_run: bool) -> Self {
        Self {
            invocation: invocation.into(),
            do_run,
            do_valgrind_run,
        }
    }
}

/// Script example descriptor
///
/// Scripts carry no memory-checker flag; a `do_valgrind_run` key is rejected.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScriptExample {
    /// Script name, optionally followed by arguments
    pub invocation: String,

    /// Whether the driver should execute this script
    #[serde(deserialize_with = "flag::deserialize")]
    pub do_run: bool,
}

impl ScriptExample {
    pub fn new(invocation: impl Into<String>, do_run: bool) -> Self {
        Self {
            invocation: invocation.into(),
            do_run,
        }
    }
}

/// One row of the registry
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExampleEntry {
    Compiled(CompiledExample),
    Script(ScriptExample),
}

impl ExampleEntry {
    pub fn kind(&self) -> ExampleKind {
        match self {
            ExampleEntry::Compiled(_) => ExampleKind::Compiled,
            ExampleEntry::Script(_) => ExampleKind::Script,
        }
    }

    pub fn invocation(&self) -> &str {
        match self {
            ExampleEntry::Compiled(e) => &e.invocation,
            ExampleEntry::Script(e) => &e.invocation,
        }
    }

    pub fn should_run(&self) -> bool {
        match self {
            ExampleEntry::Compiled(e) => e.do_run,
            ExampleEntry::Script(e) => e.do_run,
        }
    }

    /// Scripts never carry a memory-checker flag
    pub fn should_run_under_memory_checker(&self) -> bool {
        match self {
            ExampleEntry::Compiled(e) => e.do_valgrind_run,
            ExampleEntry::Script(_) => false,
        }
    }

    /// Split the invocation into program name and arguments
    pub fn command(&self) -> Invocation<'_> {
        Invocation::parse(self.invocation())
    }
}

impl From<CompiledExample> for ExampleEntry {
    fn from(example: CompiledExample) -> Self {
        ExampleEntry::Compiled(example)
    }
}

impl From<ScriptExample> for ExampleEntry {
    fn from(example: ScriptExample) -> Self {
        ExampleEntry::Script(example)
    }
}

/// Whitespace-split view of an invocation string
///
/// The raw invocation stays authoritative. No quoting rules apply: listings
/// only ever use bare `--name=value` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    program: &'a str,
    args: Vec<&'a str>,
}

impl<'a> Invocation<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let mut parts = raw.split_ascii_whitespace();
        let program = parts.next().unwrap_or("");
        Self {
            program,
            args: parts.collect(),
        }
    }

    /// Empty when the invocation is blank
    pub fn program(&self) -> &'a str {
        self.program
    }

    pub fn args(&self) -> &[&'a str] {
        &self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_split() {
        let entry: ExampleEntry =
            CompiledExample::new("red_vs_ared --queueType=RED", true, true).into();
        let cmd = entry.command();
        assert_eq!(cmd.program(), "red_vs_ared");
        assert_eq!(cmd.args(), &["--queueType=RED"]);
    }

    #[test]
    fn test_invocation_without_args() {
        let cmd = Invocation::parse("main-packet-tag");
        assert_eq!(cmd.program(), "main-packet-tag");
        assert!(cmd.args().is_empty());
    }

    #[test]
    fn test_invocation_blank() {
        let cmd = Invocation::parse("   ");
        assert_eq!(cmd.program(), "");
        assert!(cmd.args().is_empty());
    }

    #[test]
    fn test_script_never_memory_checked() {
        let entry: ExampleEntry = ScriptExample::new("sample-simulator.py", true).into();
        assert_eq!(entry.kind(), ExampleKind::Script);
        assert!(entry.should_run());
        assert!(!entry.should_run_under_memory_checker());
    }

    #[test]
    fn test_memcheck_flag_not_tied_to_run_flag() {
        // Stored as written; the driver owns the convention
        let entry: ExampleEntry = CompiledExample::new("red-tests", false, true).into();
        assert!(!entry.should_run());
        assert!(entry.should_run_under_memory_checker());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ExampleKind::Compiled.to_string(), "compiled");
        assert_eq!(ExampleKind::Script.to_string(), "script");
    }
}
