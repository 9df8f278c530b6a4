// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod registry;
pub mod set;
pub mod types;

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::Manifest;

pub use crate::dag::{CyclicGraphError, Dag, SortedDag};
pub use crate::registry::{Registry, RegistryError, TypeKey};
pub use crate::set::Set;

/// High-level entry point used by `main.rs`.
///
/// Loads and validates the manifest, then prints either the roots or the
/// full construction order to stdout, one provider per line.
pub fn run(args: CliArgs) -> Result<()> {
    let manifest = load_and_validate(&args.manifest)
        .with_context(|| format!("loading manifest {:?}", args.manifest))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.dry_run {
        write_dry_run(&mut out, &manifest)?;
        return Ok(());
    }

    let lines = if args.roots {
        root_providers(&manifest)
    } else {
        construction_order(&manifest)?
    };

    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Providers that need nothing, sorted by name.
pub fn root_providers(manifest: &Manifest) -> Vec<String> {
    let registry = manifest.registry();
    let mut roots: Vec<String> = registry.graph().roots().cloned().collect();
    roots.sort();

    info!(?roots, "providers with no needs");
    roots
}

/// Resolve the manifest's providers into a construction order.
pub fn construction_order(manifest: &Manifest) -> Result<Vec<String>> {
    let order = manifest.registry().construction_order()?;

    info!(providers = order.len(), "construction order resolved");
    Ok(order)
}

/// Simple dry-run output: providers and their needs.
pub fn write_dry_run(out: &mut impl Write, manifest: &Manifest) -> Result<()> {
    writeln!(out, "vixen dry-run")?;
    writeln!(out, "  config.missing = {:?}", manifest.config.missing)?;
    writeln!(out)?;

    writeln!(out, "providers ({}):", manifest.provider.len())?;
    for (name, provider) in manifest.provider.iter() {
        writeln!(out, "  - {name}")?;
        if let Some(ref description) = provider.description {
            writeln!(out, "      description: {description}")?;
        }
        if !provider.needs.is_empty() {
            writeln!(out, "      needs: {:?}", provider.needs)?;
        }
    }

    debug!("dry-run complete (nothing resolved)");
    Ok(())
}
