//! Core types and configuration for dockergen.
//!
//! This crate defines the generation target ([`Variant`]) and its parts,
//! the numeric version encoding used by every threshold rule
//! ([`numeric_version`]), the `dockergen.toml` schema
//! ([`GeneratorConfig`]), the per-build package overrides
//! ([`VersionCustomizations`]), and shared error types.

pub mod config;
pub mod customization;
pub mod error;
pub mod variant;
pub mod version;

pub use config::{GeneratorConfig, SkipFilter};
pub use customization::{VersionCustomization, VersionCustomizations};
pub use error::{Error, Result};
pub use variant::{Arch, Edition, Product, Variant};
pub use version::{numeric_version, version_suffix};
