use thiserror::Error;

/// Packaging failure taxonomy. Every cause is deterministic (environment or
/// configuration), so nothing here is retried.
#[derive(Debug, Error)]
pub enum PackError {
    /// A required external tool is missing or the directory is not a repository.
    #[error("{0}")]
    Environment(String),

    /// No compression tool found on the host.
    #[error("No archive backend available: install 7z, PowerShell (pwsh), or zip")]
    NoArchiveBackend,

    /// The build command failed to spawn or exited non-zero.
    #[error("Build failed: {0}")]
    BuildFailed(String),

    /// The build reported success but the declared entry file is absent.
    #[error("Build completed but the expected output is missing: {0}")]
    BuildOutputMissing(String),

    /// The resolved file list had zero entries.
    #[error("No files to package; is the repository initialized and the ignore file sane?")]
    EmptyPackage,

    /// The archive step ran but produced no usable artifact.
    #[error("Packaging failed: {0}")]
    PackagingFailed(String),
}
