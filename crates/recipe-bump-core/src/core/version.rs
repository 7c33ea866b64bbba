use crate::core::error::{BumpError, BumpResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a release version (e.g., "1.2.3", "v1.2" or "2.0.1-beta")
    ///
    /// Pre-release suffixes after '-' or '+' are ignored for ordering.
    pub fn parse(s: &str) -> BumpResult<Self> {
        let trimmed = s.trim().trim_start_matches('v');
        let core = trimmed
            .split(['-', '+'])
            .next()
            .unwrap_or_default();
        let parts: Vec<&str> = core.split('.').collect();

        if core.is_empty() || parts.len() > 3 {
            return Err(BumpError::Version(format!("Invalid version format: {}", s)));
        }

        let component = |idx: usize| -> BumpResult<u64> {
            match parts.get(idx) {
                Some(p) => p
                    .parse()
                    .map_err(|_| BumpError::Version(format!("Invalid version format: {}", s))),
                None => Ok(0),
            }
        };

        Ok(Self {
            major: component(0)?,
            minor: component(1)?,
            patch: component(2)?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
