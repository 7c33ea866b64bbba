pub mod runner;
pub mod verifier;

pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use verifier::{BuildResult, BuildVerifier};
