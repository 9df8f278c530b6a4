#![allow(dead_code)]

use std::collections::BTreeMap;
use vixen::config::{ConfigSection, Manifest, ProviderConfig, RawManifest};
use vixen::types::MissingProviderPolicy;

/// Builder for `Manifest` to simplify test setup.
pub struct ManifestBuilder {
    manifest: RawManifest,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self {
            manifest: RawManifest {
                config: ConfigSection::default(),
                provider: BTreeMap::new(),
            },
        }
    }

    pub fn with_provider(mut self, name: &str, provider: ProviderConfig) -> Self {
        self.manifest.provider.insert(name.to_string(), provider);
        self
    }

    pub fn missing(mut self, policy: MissingProviderPolicy) -> Self {
        self.manifest.config.missing = policy;
        self
    }

    /// The unvalidated manifest, for tests that expect validation to fail.
    pub fn raw(self) -> RawManifest {
        self.manifest
    }

    pub fn build(self) -> Manifest {
        Manifest::try_from(self.manifest).expect("Failed to build valid manifest from builder")
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ProviderConfig`.
pub struct ProviderConfigBuilder {
    provider: ProviderConfig,
}

impl ProviderConfigBuilder {
    pub fn new() -> Self {
        Self {
            provider: ProviderConfig {
                needs: vec![],
                description: None,
            },
        }
    }

    pub fn needs(mut self, dep: &str) -> Self {
        self.provider.needs.push(dep.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.provider.description = Some(text.to_string());
        self
    }

    pub fn build(self) -> ProviderConfig {
        self.provider
    }
}

impl Default for ProviderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
