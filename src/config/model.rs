// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::registry::Registry;
use crate::types::MissingProviderPolicy;

/// Manifest as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// missing = "error"
///
/// [provider.config]
///
/// [provider.database]
/// needs = ["config"]
/// ```
///
/// All sections are optional at parse time; validation requires at least
/// one provider.
#[derive(Debug, Clone, Deserialize)]
pub struct RawManifest {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All providers from `[provider.<name>]`, keyed by the capability they
    /// produce.
    #[serde(default)]
    pub provider: BTreeMap<String, ProviderConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigSection {
    /// `"error"` (default) or `"ignore"`.
    #[serde(default)]
    pub missing: MissingProviderPolicy,
}

/// `[provider.<name>]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProviderConfig {
    /// Capabilities that must be built before this one.
    #[serde(default)]
    pub needs: Vec<String>,

    /// Free-form text shown by `--dry-run`.
    #[serde(default)]
    pub description: Option<String>,
}

/// A manifest that passed validation.
///
/// Only constructed through `TryFrom<RawManifest>`.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub config: ConfigSection,
    pub provider: BTreeMap<String, ProviderConfig>,
}

impl Manifest {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        provider: BTreeMap<String, ProviderConfig>,
    ) -> Self {
        Self { config, provider }
    }

    /// Build the provider registry described by this manifest.
    ///
    /// Under [`MissingProviderPolicy::Ignore`], needs that no provider
    /// produces are skipped.
    pub fn registry(&self) -> Registry<String> {
        registry_from(&self.config, &self.provider)
    }
}

pub(crate) fn registry_from(
    config: &ConfigSection,
    providers: &BTreeMap<String, ProviderConfig>,
) -> Registry<String> {
    let mut registry = Registry::new();

    for (name, provider) in providers.iter() {
        let needs = provider
            .needs
            .iter()
            .filter(|need| {
                config.missing == MissingProviderPolicy::Error || providers.contains_key(*need)
            })
            .cloned();
        registry.provide(name.clone(), needs);
    }

    debug!(providers = providers.len(), "registry built from manifest");
    registry
}
