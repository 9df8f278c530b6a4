// src/config/validate.rs

use tracing::warn;

use crate::config::model::{Manifest, RawManifest, registry_from};
use crate::errors::{Result, VixenError};
use crate::registry::RegistryError;
use crate::types::MissingProviderPolicy;

impl TryFrom<RawManifest> for Manifest {
    type Error = VixenError;

    fn try_from(raw: RawManifest) -> std::result::Result<Self, Self::Error> {
        validate_raw_manifest(&raw)?;
        Ok(Manifest::new_unchecked(raw.config, raw.provider))
    }
}

fn validate_raw_manifest(manifest: &RawManifest) -> Result<()> {
    ensure_has_providers(manifest)?;
    validate_needs(manifest)?;
    validate_dag(manifest)?;
    Ok(())
}

fn ensure_has_providers(manifest: &RawManifest) -> Result<()> {
    if manifest.provider.is_empty() {
        return Err(VixenError::ConfigError(
            "manifest must contain at least one [provider.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_needs(manifest: &RawManifest) -> Result<()> {
    for (name, provider) in manifest.provider.iter() {
        for need in provider.needs.iter() {
            if need == name {
                return Err(VixenError::ConfigError(format!(
                    "provider '{}' cannot need itself",
                    name
                )));
            }
            if manifest.provider.contains_key(need) {
                continue;
            }
            match manifest.config.missing {
                MissingProviderPolicy::Error => {
                    return Err(VixenError::ConfigError(format!(
                        "provider '{}' needs '{}', which no provider produces",
                        name, need
                    )));
                }
                MissingProviderPolicy::Ignore => {
                    warn!(
                        provider = %name,
                        need = %need,
                        "need has no provider; assuming it is supplied externally"
                    );
                }
            }
        }
    }
    Ok(())
}

fn validate_dag(manifest: &RawManifest) -> Result<()> {
    // Edge direction: need -> provider. For
    //   [provider.B]
    //   needs = ["A"]
    // we add edge A -> B.
    let registry = registry_from(&manifest.config, &manifest.provider);

    match registry.construction_order() {
        Ok(_order) => Ok(()),
        Err(RegistryError::Unsatisfiable(_)) => {
            let mut members: Vec<String> = registry.graph().cycles().concat();
            members.sort();
            Err(VixenError::DependencyCycle(format!(
                "providers involved: {}",
                members.join(", ")
            )))
        }
        Err(other) => Err(other.into()),
    }
}
