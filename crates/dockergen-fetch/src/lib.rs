//! Checksum retrieval for generated Dockerfiles.
//!
//! The only network access dockergen performs: one GET per package for the
//! `.sha256` file published next to it. Failures never abort a run; they
//! surface as [`MISSING_SHA256`] or [`HTTP_ERROR`] in the rendered output.

pub mod checksum;
pub mod error;
pub mod fetcher;

pub use checksum::{ChecksumClient, HTTP_ERROR, MISSING_SHA256, parse_sha256};
pub use error::FetchError;
pub use fetcher::{HttpFetcher, ReqwestFetcher};
