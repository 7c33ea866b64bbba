use thiserror::Error;

pub type BumpResult<T> = Result<T, BumpError>;

#[derive(Error, Debug)]
pub enum BumpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid arguments: {0}")]
    Arg(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Manifest parse error: {0}")]
    Parse(String),

    #[error("Hash conversion error: {0}")]
    Conversion(String),

    #[error("Build verification failed: {0}")]
    BuildVerification(String),

    #[error("Package file error: {0}")]
    PackageFile(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),
}

impl BumpError {
    /// Whether the error happened while talking to the manifest host
    pub fn is_fetch(&self) -> bool {
        matches!(self, BumpError::Fetch(_) | BumpError::Http(_))
    }
}
