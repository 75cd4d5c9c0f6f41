//! Numeric version encoding used for threshold comparisons.
//!
//! Versions are compared by packing `MAJOR.MINOR.PATCH` into a single
//! integer with every component zero-padded to two digits:
//!
//! ```
//! use dockergen_core::numeric_version;
//!
//! assert_eq!(numeric_version("7.1.0").unwrap(), 70100);
//! assert_eq!(numeric_version("7.0.3-MP1").unwrap(), 70003);
//! assert!(numeric_version("7.1.0").unwrap() < numeric_version("7.1.1").unwrap());
//! ```
//!
//! # Known limitation
//!
//! Components of three or more digits are not truncated, so they overflow
//! into the neighbouring slot: `1.100.0` encodes as `110000`, which sorts
//! above `10.0.0` (`100000`). Every threshold constant in the resolver was
//! chosen against this encoding, so it is kept as is.

use crate::{Error, Result};

/// Encodes the `MAJOR.MINOR.PATCH` prefix of `version` as an integer.
///
/// Anything after the first `-` is ignored. Components past the third are
/// ignored as well.
pub fn numeric_version(version: &str) -> Result<u64> {
    let base = version.split('-').next().unwrap_or(version);
    let sections: Vec<&str> = base.split('.').collect();
    if sections.len() < 3 {
        return Err(Error::MalformedVersion {
            version: version.to_owned(),
            reason: "expected at least MAJOR.MINOR.PATCH",
        });
    }

    let mut packed = String::with_capacity(6);
    for section in &sections[..3] {
        if section.is_empty() || !section.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedVersion {
                version: version.to_owned(),
                reason: "version components must be numeric",
            });
        }
        packed.push_str(&format!("{section:0>2}"));
    }

    packed.parse().map_err(|_| Error::MalformedVersion {
        version: version.to_owned(),
        reason: "version does not fit in 64 bits",
    })
}

/// Returns whatever follows `MAJOR.MINOR.PATCH-`, or `""` when there is no
/// suffix.
///
/// `0.0.0-forestdb` yields `forestdb`; `7.0.3-MP1` yields `MP1`.
pub fn version_suffix(version: &str) -> &str {
    version.split_once('-').map_or("", |(_, rest)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_each_component() {
        assert_eq!(numeric_version("6.6.2").unwrap(), 60602);
        assert_eq!(numeric_version("3.0.3").unwrap(), 30003);
        assert_eq!(numeric_version("07.01.00").unwrap(), 70100);
    }

    #[test]
    fn ignores_suffix() {
        assert_eq!(numeric_version("2.0.0-devbuild").unwrap(), 20000);
        assert_eq!(numeric_version("0.0.0-forestdb").unwrap(), 0);
    }

    #[test]
    fn rejects_short_versions() {
        assert!(matches!(
            numeric_version("7.1"),
            Err(Error::MalformedVersion { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_components() {
        assert!(numeric_version("7.x.0").is_err());
        assert!(numeric_version("7..0").is_err());
        assert!(numeric_version("").is_err());
    }

    #[test]
    fn wide_components_overflow_into_neighbours() {
        // Preserved encoding quirk: 1.100.0 sorts above 10.0.0.
        assert_eq!(numeric_version("1.100.0").unwrap(), 110000);
        assert!(numeric_version("1.100.0").unwrap() > numeric_version("10.0.0").unwrap());
    }

    #[test]
    fn suffix_extraction() {
        assert_eq!(version_suffix("0.0.0-forestdb"), "forestdb");
        assert_eq!(version_suffix("7.0.3-MP1"), "MP1");
        assert_eq!(version_suffix("7.1.1"), "");
    }
}
