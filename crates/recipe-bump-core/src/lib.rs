// Core functionality
pub mod core;

// Re-export commonly used types
pub use core::{format_error_with_help, BumpError, BumpResult, ErrorHelp};
