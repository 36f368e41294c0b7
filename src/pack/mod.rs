//! The packaging pipeline.
//!
//! Linear state machine with early-exit failure branches: resolve the
//! repository root, run a build when the template requires one, collect the
//! version-control-aware file set, filter and augment it, and produce a
//! timestamped zip under `dist/`. Single-threaded throughout; the dominant
//! cost is a handful of blocking external-process calls.

pub mod archive;
pub mod build;
pub mod error;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::git;

pub use error::PackError;

/// Conventional output directory for both compiled entries and archives.
pub const OUTPUT_DIR: &str = "dist";

/// Run-scoped state, recomputed per invocation and never persisted.
#[derive(Debug)]
pub struct PackagingContext {
    pub root: PathBuf,
    pub build: Option<build::BuildPlan>,
    pub files: Vec<String>,
}

/// Execute the whole pipeline; returns the absolute artifact path.
///
/// The repository root is threaded through every step explicitly; the
/// process working directory is never changed.
pub fn run(start_dir: &Path) -> Result<PathBuf, PackError> {
    // 1. Locate root
    if !git::is_available() {
        return Err(PackError::Environment(
            "git is required for packaging but was not found on PATH".to_string(),
        ));
    }
    let root = git::repo_root(start_dir).map_err(|err| PackError::Environment(err.to_string()))?;
    println!("📦 Packaging {}", root.display());

    // 2-3. Detect project kind, build if needed
    let plan = build::detect(&root);
    if let Some(plan) = &plan {
        build::run(&root, plan)?;
    }

    // 4. Enumerate
    let raw = git::list_files(&root).map_err(|err| PackError::Environment(err.to_string()))?;

    // 5-6. Filter, augment, dedupe
    let files = resolve_file_list(raw, plan.as_ref().map(|p| p.entry.as_str()));
    let context = PackagingContext { root, build: plan, files };

    // 7. Validate non-empty
    if context.files.is_empty() {
        return Err(PackError::EmptyPackage);
    }

    // 8. Temp workspace; removed on every exit path via Drop
    let workspace = tempfile::tempdir()
        .map_err(|err| PackError::PackagingFailed(format!("Failed to create workspace: {err}")))?;

    // 9-10. Archive and verify
    let output = output_path(&context.root)?;
    archive::create_archive(&context.root, &context.files, workspace.path(), &output)?;

    Ok(output)
}

/// Drop archives from previous runs, and, when a build step ran, everything
/// under the output directory (it is conventionally ignored and holds stale
/// compiled files); dedupe preserving first-seen order, then re-add the
/// build-output entry exactly once so it is not silently excluded. Tracked
/// files under the output directory survive builds-free runs.
pub fn resolve_file_list<I>(raw: I, build_entry: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let output_prefix = format!("{OUTPUT_DIR}/");
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for path in raw {
        let path = path.replace('\\', "/");
        // Archives from previous runs must never package themselves
        if path.starts_with(&output_prefix) && path.ends_with(".zip") {
            continue;
        }
        if build_entry.is_some() && (path == OUTPUT_DIR || path.starts_with(&output_prefix)) {
            continue;
        }
        if Some(path.as_str()) == build_entry {
            continue;
        }
        if seen.insert(path.clone()) {
            files.push(path);
        }
    }

    if let Some(entry) = build_entry {
        files.push(entry.to_string());
    }

    files
}

/// Timestamped artifact path under `<root>/dist/`, directory auto-created.
/// Second-resolution granularity avoids same-run collisions.
fn output_path(root: &Path) -> Result<PathBuf, PackError> {
    let output_dir = root.join(OUTPUT_DIR);
    fs::create_dir_all(&output_dir).map_err(|err| {
        PackError::PackagingFailed(format!(
            "Failed to create {}: {err}",
            output_dir.display()
        ))
    })?;

    let prefix = archive_prefix(root);
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    Ok(output_dir.join(format!("{prefix}-{timestamp}.zip")))
}

/// Archive name prefix: the configured project name when config.yml is
/// readable, otherwise the repository directory name.
fn archive_prefix(root: &Path) -> String {
    let name = ProjectConfig::load(root)
        .map(|config| config.name)
        .ok()
        .filter(|name| !name.trim().is_empty())
        .or_else(|| {
            root.file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "package".to_string());

    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();

    if sanitized.is_empty() {
        "package".to_string()
    } else {
        sanitized
    }
}
