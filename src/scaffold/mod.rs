//! Project scaffolding: writes the template file set to disk and optionally
//! initializes a git repository in the new project.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::git;
use crate::options::ProjectOptions;
use crate::templates;

/// Create `<parent>/<name>` from the template set. Refuses to touch an
/// existing directory. Returns the created project root.
pub fn scaffold_project(parent: &Path, options: &ProjectOptions, init_git: bool) -> Result<PathBuf> {
    let target_root = parent.join(&options.name);
    if target_root.exists() {
        bail!("Target directory already exists: {}", target_root.display());
    }

    let files = templates::project_files(options)?;

    fs::create_dir_all(&target_root)
        .with_context(|| format!("Failed to create {}", target_root.display()))?;

    for file in &files {
        let path = target_root.join(&file.relative_path);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  ✓ {}", file.relative_path);
    }

    if init_git {
        if git::is_available() {
            git::init(&target_root)?;
            println!("  ✓ Initialized git repository");
        } else {
            println!("  ⚠️  git not found; skipping repository initialization");
        }
    }

    Ok(target_root)
}
