use std::str::FromStr;
use serde::Deserialize;

/// What to do when a provider needs a capability that no provider in the
/// manifest produces.
///
/// - `Error`: reject the manifest (default).
/// - `Ignore`: treat the capability as supplied from outside. It is left out
///   of the dependency graph and the construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingProviderPolicy {
    #[default]
    Error,
    Ignore,
}

impl FromStr for MissingProviderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(MissingProviderPolicy::Error),
            "ignore" => Ok(MissingProviderPolicy::Ignore),
            other => Err(format!(
                "invalid missing provider policy: {other} (expected \"error\" or \"ignore\")"
            )),
        }
    }
}
