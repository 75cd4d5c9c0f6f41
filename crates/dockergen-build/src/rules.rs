//! Version-range rule tables.
//!
//! Every era-dependent convention (base image, package naming, extra
//! dependencies, ...) is an ordered [`RuleTable`]. Rules are checked top to
//! bottom against the numeric version and the first match wins. The
//! fallback applies when nothing matches or the version is malformed.

/// One inclusive numeric version range and the value it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<T> {
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub value: T,
}

impl<T> Rule<T> {
    pub const fn between(min: u64, max: u64, value: T) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            value,
        }
    }

    pub const fn exactly(version: u64, value: T) -> Self {
        Self::between(version, version, value)
    }

    pub const fn at_least(min: u64, value: T) -> Self {
        Self {
            min: Some(min),
            max: None,
            value,
        }
    }

    pub const fn at_most(max: u64, value: T) -> Self {
        Self {
            min: None,
            max: Some(max),
            value,
        }
    }

    pub fn matches(&self, version: u64) -> bool {
        self.min.is_none_or(|min| version >= min) && self.max.is_none_or(|max| version <= max)
    }
}

#[derive(Debug)]
pub struct RuleTable<T: 'static> {
    pub rules: &'static [Rule<T>],
    pub fallback: T,
}

impl<T: Copy + 'static> RuleTable<T> {
    /// First matching rule's value, or the fallback.
    pub fn select(&self, version: Option<u64>) -> T {
        version
            .and_then(|v| self.rules.iter().find(|rule| rule.matches(v)))
            .map_or(self.fallback, |rule| rule.value)
    }
}
