pub mod client;
pub mod parser;

pub use client::{ManifestClient, ManifestSource};
pub use parser::{parse_hash, parse_version, ManifestInfo};
