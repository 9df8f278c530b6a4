// src/config/mod.rs

//! Provider manifests.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a manifest from disk (`loader.rs`).
//! - Validate it, including acyclicity of the needs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_manifest_path, load_and_validate, load_from_path};
pub use model::{ConfigSection, Manifest, ProviderConfig, RawManifest};
