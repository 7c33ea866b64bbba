use crate::core::BumpError;

/// Provides helpful suggestions for common errors
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for BumpError {
    fn help(&self) -> Option<String> {
        match self {
            BumpError::Arg(_) => Some(
                "💡 Suggestion: Run 'recipe-bump --help' to see the supported flags".to_string(),
            ),
            BumpError::Precondition(msg) => {
                if msg.contains("not found on PATH") {
                    Some(
                        "💡 Suggestion: Install the build tool, or point build_command in recipe-bump.yaml at one that is installed"
                            .to_string(),
                    )
                } else if msg.contains("marker file") || msg.contains("package file") {
                    Some(
                        "💡 Suggestion: Run recipe-bump from the root of the repository that holds the package recipe"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            BumpError::Http(e) => {
                if e.is_timeout() {
                    Some(
                        "💡 Suggestion: The manifest host did not answer in time. Check your connection or raise timeout_secs"
                            .to_string(),
                    )
                } else if e.is_connect() {
                    Some(
                        "💡 Suggestion: Check your internet connection and firewall settings"
                            .to_string(),
                    )
                } else {
                    Some(
                        "💡 Suggestion: Check your internet connection, or verify the manifest host is accessible"
                            .to_string(),
                    )
                }
            }
            BumpError::Fetch(msg) => {
                if msg.contains("HTTP 403") {
                    Some(
                        "💡 Suggestion: The host rejected the request. Try a different user_agent in recipe-bump.yaml"
                            .to_string(),
                    )
                } else if msg.contains("HTTP 404") {
                    Some("💡 Suggestion: Verify manifest_url in recipe-bump.yaml".to_string())
                } else {
                    None
                }
            }
            BumpError::Parse(_) => Some(
                "💡 Suggestion: The upstream manifest layout may have changed. Inspect it with curl before retrying"
                    .to_string(),
            ),
            BumpError::BuildVerification(_) => Some(
                "💡 Suggestion: The recipe was restored. Run the build command by hand to inspect the failure"
                    .to_string(),
            ),
            BumpError::Config(msg) => {
                if msg.contains("Failed to parse config") {
                    Some(
                        "💡 Suggestion: Check the YAML syntax of recipe-bump.yaml. Common issues:\n  - Missing colons after keys\n  - Incorrect indentation\n  - A list where a single value is expected"
                            .to_string(),
                    )
                } else {
                    Some(
                        "💡 Suggestion: Fix the setting named above in recipe-bump.yaml, or delete it to use the default"
                            .to_string(),
                    )
                }
            }
            BumpError::Io(e) => {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    Some(
                        "💡 Suggestion: Check file permissions on the package file and its directory"
                            .to_string(),
                    )
                } else if e.kind() == std::io::ErrorKind::NotFound {
                    Some(
                        "💡 Suggestion: The file or directory may not exist. Check the path and try again"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Format an error with helpful suggestions
pub fn format_error_with_help(error: &BumpError) -> String {
    let mut output = format!("❌ Error: {}", error);

    if let Some(help) = error.help() {
        output.push_str("\n\n");
        output.push_str(&help);
    }

    output
}
