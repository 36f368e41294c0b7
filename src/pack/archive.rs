//! Archive construction via host compression tools.
//!
//! Backends are probed in priority order and receive the resolved file list
//! through a manifest file rather than argv, so paths with spaces or shell
//! metacharacters survive and command-line length limits never apply.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::exec::ExecSpec;

use super::error::PackError;

/// One compression tool the host might provide.
pub trait ArchiveBackend {
    fn name(&self) -> &'static str;

    /// Availability probe; cheap, no side effects.
    fn is_available(&self) -> bool;

    /// Create `output` containing exactly the manifest's files, resolved
    /// relative to `root`.
    fn create(&self, root: &Path, manifest: &Path, output: &Path) -> Result<(), PackError>;
}

struct SevenZip;
struct PowerShell;
struct InfoZip;

impl ArchiveBackend for SevenZip {
    fn name(&self) -> &'static str {
        "7z"
    }

    fn is_available(&self) -> bool {
        which::which("7z").is_ok()
    }

    fn create(&self, root: &Path, manifest: &Path, output: &Path) -> Result<(), PackError> {
        let listfile = format!("@{}", manifest.display());
        let result = ExecSpec::new("7z")
            .args(["a", "-tzip"])
            .arg(output.display().to_string())
            .arg(listfile)
            .current_dir(root)
            .run_captured()
            .map_err(|err| PackError::PackagingFailed(err.to_string()))?;

        if !result.success {
            return Err(PackError::PackagingFailed(format!(
                "7z reported failure: {}",
                result.stderr.trim()
            )));
        }
        Ok(())
    }
}

impl PowerShell {
    fn shell() -> Option<&'static str> {
        for shell in ["pwsh", "powershell"] {
            if which::which(shell).is_ok() {
                return Some(shell);
            }
        }
        None
    }
}

impl ArchiveBackend for PowerShell {
    fn name(&self) -> &'static str {
        "powershell"
    }

    fn is_available(&self) -> bool {
        Self::shell().is_some()
    }

    fn create(&self, root: &Path, manifest: &Path, output: &Path) -> Result<(), PackError> {
        let shell = Self::shell().ok_or(PackError::NoArchiveBackend)?;

        // Compress-Archive stores file arguments at the archive root by leaf
        // name, losing directory structure and colliding on duplicate leaf
        // names. Stage the list as a tree and compress the tree instead, so
        // this backend produces the same file set as 7z and zip.
        let staging = manifest
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("staging");
        stage_files(root, manifest, &staging)?;

        let command = format!(
            "Compress-Archive -Force -Path '{}' -DestinationPath '{}'",
            staging.join("*").display(),
            output.display()
        );
        let result = ExecSpec::new(shell)
            .args(["-NoProfile", "-NonInteractive", "-Command"])
            .arg(command)
            .current_dir(root)
            .run_captured()
            .map_err(|err| PackError::PackagingFailed(err.to_string()))?;

        if !result.success {
            return Err(PackError::PackagingFailed(format!(
                "Compress-Archive reported failure: {}",
                result.stderr.trim()
            )));
        }
        Ok(())
    }
}

impl ArchiveBackend for InfoZip {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn is_available(&self) -> bool {
        which::which("zip").is_ok()
    }

    fn create(&self, root: &Path, manifest: &Path, output: &Path) -> Result<(), PackError> {
        // -@ reads the newline-delimited file list from stdin
        let result = ExecSpec::new("zip")
            .arg("-q")
            .arg(output.display().to_string())
            .arg("-@")
            .current_dir(root)
            .stdin_file(manifest)
            .run_captured()
            .map_err(|err| PackError::PackagingFailed(err.to_string()))?;

        if !result.success {
            return Err(PackError::PackagingFailed(format!(
                "zip reported failure: {}",
                result.stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Copy the manifest's files into `staging`, preserving relative paths.
fn stage_files(root: &Path, manifest: &Path, staging: &Path) -> Result<(), PackError> {
    let listing = fs::read_to_string(manifest)
        .map_err(|err| PackError::PackagingFailed(format!("Failed to read manifest: {err}")))?;

    for entry in listing.lines() {
        if entry.is_empty() {
            continue;
        }
        let dest = staging.join(entry);
        if let Some(dir) = dest.parent() {
            fs::create_dir_all(dir).map_err(|err| {
                PackError::PackagingFailed(format!("Failed to stage {entry}: {err}"))
            })?;
        }
        fs::copy(root.join(entry), &dest).map_err(|err| {
            PackError::PackagingFailed(format!("Failed to stage {entry}: {err}"))
        })?;
    }

    Ok(())
}

/// All known backends in priority order.
pub fn backends() -> Vec<Box<dyn ArchiveBackend>> {
    vec![Box::new(SevenZip), Box::new(PowerShell), Box::new(InfoZip)]
}

/// First available backend, if any.
pub fn available_backend() -> Option<Box<dyn ArchiveBackend>> {
    backends().into_iter().find(|backend| backend.is_available())
}

/// Write the newline-delimited manifest into the temp workspace.
pub fn write_manifest(workspace: &Path, files: &[String]) -> Result<PathBuf, PackError> {
    let path = workspace.join("package-manifest.txt");
    let mut file = File::create(&path)
        .map_err(|err| PackError::PackagingFailed(format!("Failed to create manifest: {err}")))?;
    for entry in files {
        writeln!(file, "{entry}")
            .map_err(|err| PackError::PackagingFailed(format!("Failed to write manifest: {err}")))?;
    }
    Ok(path)
}

/// Build the archive with the first available backend and verify the result.
pub fn create_archive(
    root: &Path,
    files: &[String],
    workspace: &Path,
    output: &Path,
) -> Result<(), PackError> {
    let manifest = write_manifest(workspace, files)?;
    let backend = available_backend().ok_or(PackError::NoArchiveBackend)?;

    println!("📦 Archiving {} files via {}", files.len(), backend.name());
    backend.create(root, &manifest, output)?;
    verify_artifact(output)
}

/// Mandatory post-condition: a missing or zero-byte archive is a failure,
/// not an artifact.
pub fn verify_artifact(path: &Path) -> Result<(), PackError> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => Ok(()),
        Ok(_) => Err(PackError::PackagingFailed(format!(
            "archive {} exists but is empty",
            path.display()
        ))),
        Err(_) => Err(PackError::PackagingFailed(format!(
            "archive {} was not created",
            path.display()
        ))),
    }
}
