//! Git queries for scaffolding and packaging.
//!
//! All invocations use porcelain-stable, script-friendly modes
//! (NUL-delimited output, explicit flags) rather than human-oriented output,
//! with terminal credential prompts disabled so no call can hang on input.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::exec::ExecSpec;

/// Check whether a git executable is reachable on PATH.
pub fn is_available() -> bool {
    which::which("git").is_ok()
}

/// Resolve the enclosing repository root for a directory.
pub fn repo_root(dir: &Path) -> Result<PathBuf> {
    let output = ExecSpec::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .env("GIT_TERMINAL_PROMPT", "0")
        .current_dir(dir)
        .run_captured()
        .context("Failed to run git rev-parse")?;

    if !output.success {
        bail!("Not inside a git repository: {}", dir.display());
    }

    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if root.is_empty() {
        bail!("git rev-parse returned no repository root");
    }
    Ok(PathBuf::from(root))
}

/// Every file that is tracked or present-but-untracked-and-not-ignored,
/// relative to the repository root. NUL-delimited so paths with spaces or
/// unusual characters survive; duplicates removed preserving first-seen
/// order (tracked files also show up in --others output on some setups).
pub fn list_files(root: &Path) -> Result<Vec<String>> {
    let output = ExecSpec::new("git")
        .args(["ls-files", "-z", "--cached", "--others", "--exclude-standard"])
        .env("GIT_TERMINAL_PROMPT", "0")
        .current_dir(root)
        .run_captured()
        .context("Failed to run git ls-files")?;

    if !output.success {
        bail!("git ls-files failed: {}", output.stderr.trim());
    }

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for raw in output.stdout.split(|byte| *byte == 0) {
        if raw.is_empty() {
            continue;
        }
        let path = String::from_utf8_lossy(raw).replace('\\', "/");
        if seen.insert(path.clone()) {
            files.push(path);
        }
    }

    Ok(files)
}

/// Initialize a fresh repository in a scaffolded project.
pub fn init(dir: &Path) -> Result<()> {
    let output = ExecSpec::new("git")
        .args(["init", "--quiet"])
        .env("GIT_TERMINAL_PROMPT", "0")
        .current_dir(dir)
        .run_captured()
        .context("Failed to run git init")?;

    if !output.success {
        bail!("git init failed: {}", output.stderr.trim());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_repo_root_outside_repository_fails() {
        if !is_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        // System temp is not a repository; a fresh subdirectory certainly is not
        let sub = dir.path().join("plain");
        fs::create_dir(&sub).unwrap();
        assert!(repo_root(&sub).is_err());
    }

    #[test]
    fn test_list_files_respects_ignore_rules() {
        if !is_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        init(dir.path()).unwrap();
        fs::write(dir.path().join(".gitignore"), "secret.txt\n").unwrap();
        fs::write(dir.path().join("kept.txt"), "data").unwrap();
        fs::write(dir.path().join("secret.txt"), "data").unwrap();

        let files = list_files(dir.path()).unwrap();
        assert!(files.contains(&".gitignore".to_string()));
        assert!(files.contains(&"kept.txt".to_string()));
        assert!(!files.contains(&"secret.txt".to_string()));
    }

    #[test]
    fn test_list_files_has_no_duplicates() {
        if !is_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        init(dir.path()).unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let files = list_files(dir.path()).unwrap();
        let unique: HashSet<_> = files.iter().collect();
        assert_eq!(unique.len(), files.len());
    }
}
