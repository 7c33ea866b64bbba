use crate::core::{BumpError, BumpResult};
use serde_json::Value;

/// Platform whose release hash is tracked
pub const PLATFORM: &str = "linux";

/// Architecture whose release hash is tracked
pub const ARCH: &str = "amd64";

/// Latest release as described by the upstream manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    pub version: String,
    /// Hex SHA-256 of the linux/amd64 artifact
    pub hash_hex: String,
}

impl ManifestInfo {
    /// Parse the manifest once and pull out version and hash
    pub fn from_document(raw: &str) -> BumpResult<Self> {
        let doc = parse_document(raw)?;
        Ok(Self {
            version: version_of(&doc)?,
            hash_hex: hash_of(&doc)?,
        })
    }
}

/// Extract the release version (top-level `"version"` string)
pub fn parse_version(raw: &str) -> BumpResult<String> {
    version_of(&parse_document(raw)?)
}

/// Extract the hex SHA-256 at `linux.amd64.sha256`
pub fn parse_hash(raw: &str) -> BumpResult<String> {
    hash_of(&parse_document(raw)?)
}

fn parse_document(raw: &str) -> BumpResult<Value> {
    serde_json::from_str(raw)
        .map_err(|e| BumpError::Parse(format!("manifest is not valid JSON: {}", e)))
}

fn version_of(doc: &Value) -> BumpResult<String> {
    match doc.get("version") {
        Some(Value::String(v)) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        Some(other) => Err(BumpError::Parse(format!(
            "manifest \"version\" is not a non-empty string: {}",
            other
        ))),
        None => Err(BumpError::Parse(
            "manifest has no top-level \"version\" field".to_string(),
        )),
    }
}

fn hash_of(doc: &Value) -> BumpResult<String> {
    let arch = find_arch(doc).ok_or_else(|| {
        BumpError::Parse(format!("manifest has no \"{}\".\"{}\" entry", PLATFORM, ARCH))
    })?;

    arch.get("sha256")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            BumpError::Parse(format!(
                "manifest entry \"{}\".\"{}\" has no \"sha256\" string",
                PLATFORM, ARCH
            ))
        })
}

/// Optional wrapper object some manifests put around the platform table
const PLATFORMS_WRAPPER: &str = "platforms";

/// Resolve `linux.amd64`, either at the top level or under `platforms`
///
/// Nothing else is searched, so unrelated nested objects (archives,
/// previous releases) can never supply the hash.
fn find_arch(doc: &Value) -> Option<&Value> {
    arch_in(doc).or_else(|| doc.get(PLATFORMS_WRAPPER).and_then(arch_in))
}

fn arch_in(table: &Value) -> Option<&Value> {
    table
        .get(PLATFORM)
        .and_then(|platform| platform.get(ARCH))
        .filter(|arch| arch.is_object())
}
