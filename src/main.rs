use anyhow::{Context, Result};
use clap::Parser;
use example_registry::catalog::{ExampleKind, ExampleRegistry};
use example_registry::cli::{Cli, Command, SourceArgs};
use example_registry::{legacy, output};
use std::fs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn read_legacy(path: &std::path::Path) -> Result<ExampleRegistry> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read legacy listing: {}", path.display()))?;
    legacy::parse(&source)
        .with_context(|| format!("Failed to parse legacy listing: {}", path.display()))
}

/// Load the registry named by the source flags, or the built-in one
fn load_registry(source: &SourceArgs) -> Result<ExampleRegistry> {
    match (&source.registry, &source.legacy) {
        (Some(path), _) => ExampleRegistry::from_toml(path)
            .with_context(|| format!("Failed to load registry: {}", path.display())),
        (None, Some(path)) => read_legacy(path),
        (None, None) => {
            debug!("using built-in registry");
            Ok(ExampleRegistry::shared()
                .context("Failed to parse embedded examples-to-run.toml")?
                .clone())
        }
    }
}

fn emit(text: &str) -> Result<()> {
    output::write_output(std::io::stdout().lock(), text).context("Failed to write to stdout")
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match args.command {
        Command::List {
            source,
            kind,
            runnable,
            memcheck,
            format,
        } => {
            let registry = load_registry(&source)?;
            let kind = kind.map(ExampleKind::from);
            let selected: Vec<_> = registry
                .entries()
                .iter()
                .filter(|e| kind.map_or(true, |k| e.kind() == k))
                .filter(|e| !runnable || e.should_run())
                .filter(|e| !memcheck || e.should_run_under_memory_checker())
                .cloned()
                .collect();
            debug!(selected = selected.len(), total = registry.len(), "filtered entries");
            let selected = ExampleRegistry::from_entries(selected);
            emit(&output::render(&selected, format)?)?;
        }
        Command::Convert { from, format } => {
            let registry = read_legacy(&from)?;
            emit(&output::render(&registry, format)?)?;
        }
        Command::Summary { source } => {
            let registry = load_registry(&source)?;
            emit(&output::Summary::of(&registry).render())?;
        }
    }

    Ok(())
}
