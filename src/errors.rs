// src/errors.rs

//! Crate-wide error type.
//!
//! The graph itself only ever fails with [`CyclicGraphError`]; everything
//! else here comes from loading and checking a provider manifest.
//!
//! [`CyclicGraphError`]: crate::dag::CyclicGraphError

use thiserror::Error;

use crate::registry::RegistryError;

#[derive(Error, Debug)]
pub enum VixenError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cycle detected in provider graph: {0}")]
    DependencyCycle(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, VixenError>;
