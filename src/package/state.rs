use crate::core::{BumpError, BumpResult};
use regex::Regex;
use std::fs;
use std::ops::Range;
use std::path::Path;

/// Version and hash currently recorded in a package-definition file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageState {
    pub version: String,
    /// SRI-style digest, e.g. `sha256-...`
    pub hash: String,
}

/// A `name = "value"` field in a package-definition file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Version,
    Hash,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Version => "version",
            Field::Hash => "sha256",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Field::Version => r#"\bversion\s*=\s*"([^"]*)""#,
            Field::Hash => r#"\bsha256\s*=\s*"([^"]*)""#,
        }
    }

    /// Characters a written value may contain
    ///
    /// Nothing that a Nix string can interpret: no quotes, backslashes,
    /// `${` interpolation or whitespace.
    fn value_pattern(self) -> &'static str {
        match self {
            Field::Version => r"^[A-Za-z0-9._+~-]+$",
            Field::Hash => r"^[A-Za-z0-9]+-[A-Za-z0-9+/]+=*$",
        }
    }

    /// Whether `value` is safe to place between the field's quotes
    pub fn accepts(self, value: &str) -> BumpResult<bool> {
        let re = Regex::new(self.value_pattern())
            .map_err(|e| BumpError::PackageFile(format!("Invalid regex pattern: {}", e)))?;
        Ok(re.is_match(value))
    }

    /// Byte range of the first occurrence's value, quotes excluded
    pub fn value_range(self, content: &str) -> BumpResult<Option<Range<usize>>> {
        let re = Regex::new(self.pattern())
            .map_err(|e| BumpError::PackageFile(format!("Invalid regex pattern: {}", e)))?;

        Ok(re
            .captures(content)
            .and_then(|cap| cap.get(1))
            .map(|m| m.range()))
    }

    /// First occurrence's value, or an empty string when absent
    pub fn extract(self, content: &str) -> BumpResult<String> {
        Ok(self
            .value_range(content)?
            .map(|range| content[range].to_string())
            .unwrap_or_default())
    }
}

impl PackageState {
    /// Scan package-definition text for the first version and hash fields
    ///
    /// Missing fields come back empty; nothing is validated here.
    pub fn parse(content: &str) -> BumpResult<Self> {
        Ok(Self {
            version: Field::Version.extract(content)?,
            hash: Field::Hash.extract(content)?,
        })
    }
}

/// Read the current version and hash from a package-definition file
pub fn read_current_state(path: &Path) -> BumpResult<PackageState> {
    let content = fs::read_to_string(path).map_err(|e| {
        BumpError::PackageFile(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let state = PackageState::parse(&content)?;
    tracing::debug!(
        "Current state of {}: version={:?} hash={:?}",
        path.display(),
        state.version,
        state.hash
    );

    Ok(state)
}
