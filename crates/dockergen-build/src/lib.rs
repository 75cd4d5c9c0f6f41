//! Variant resolution and Dockerfile generation for dockergen.
//!
//! # Pipeline
//!
//! ```text
//! dockergen <root>
//!   for each edition × product:
//!     1. Discover  ── <root>/<edition>/<product>/N.N.N*
//!     2. Filter    ── skip patterns (hand-maintained versions)
//!     3. Construct ── construct_variant(): template, arches, upstream tag
//!     4. Exists?   ── Dockerfile present → skip 5–6
//!     5. Render    ── Resolver + checksums → template → Dockerfile
//!     6. Deploy    ── resources/<product>/{scripts,config}
//!     7. README    ── always re-copied
//! ```
//!
//! # Resolution
//!
//! [`Resolver`] derives base image, package filename and URL, extra OS
//! dependencies and the systemd workaround from ordered version-range
//! tables ([`rules::RuleTable`]). Customized packages from
//! [`dockergen_core::VersionCustomizations`] take precedence over naming
//! rules.

pub mod deploy;
pub mod discover;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod resolve;
pub mod rules;
pub mod template;

pub use error::GenerateError;
pub use params::{TemplateParams, TemplateValue, template_params};
pub use pipeline::{GenerationReport, Outcome, Pipeline, construct_variant};
pub use resolve::{PackageDescriptor, Resolver};
