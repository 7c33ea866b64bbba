use crate::core::{BumpError, BumpResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Algorithm prefix used by the package-definition file
pub const SRI_PREFIX: &str = "sha256-";

/// Length of a hex-encoded SHA-256 digest
const SHA256_HEX_LEN: usize = 64;

/// Convert a hex SHA-256 digest into SRI form (`sha256-<base64>`)
pub fn to_local_encoding(hex_digest: &str) -> BumpResult<String> {
    let hex_digest = hex_digest.trim();

    if hex_digest.len() != SHA256_HEX_LEN {
        return Err(BumpError::Conversion(format!(
            "expected {} hex characters, got {}",
            SHA256_HEX_LEN,
            hex_digest.len()
        )));
    }

    let bytes = hex::decode(hex_digest)
        .map_err(|e| BumpError::Conversion(format!("invalid hex digest '{}': {}", hex_digest, e)))?;

    Ok(format!("{}{}", SRI_PREFIX, STANDARD.encode(bytes)))
}
