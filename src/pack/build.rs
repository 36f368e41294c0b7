//! Build-step detection and invocation for compiled templates.
//!
//! Detection is heuristic and best-effort, not a declared property: a
//! tsconfig.json, a package.json `build` script invoking tsc, or a
//! `typescript` devDependency marks the project as needing a build.

use std::fs;
use std::path::Path;

use crate::config::{ProjectConfig, Runtime};
use crate::exec::ExecSpec;

use super::error::PackError;

const DEFAULT_ENTRY: &str = "dist/index.js";

#[derive(Debug, Clone)]
pub struct BuildPlan {
    /// Compiled entry file the runtime loads, relative to the repo root.
    pub entry: String,
}

/// Decide whether this project needs a build step.
pub fn detect(root: &Path) -> Option<BuildPlan> {
    if !needs_build(root) {
        return None;
    }
    Some(BuildPlan {
        entry: declared_entry(root),
    })
}

fn needs_build(root: &Path) -> bool {
    if root.join("tsconfig.json").exists() {
        return true;
    }

    let Some(pkg) = read_package_json(root) else {
        return false;
    };

    let build_uses_tsc = pkg["scripts"]["build"]
        .as_str()
        .is_some_and(|script| script.contains("tsc"));
    let has_typescript_dep = pkg["devDependencies"]["typescript"].is_string()
        || pkg["dependencies"]["typescript"].is_string();

    build_uses_tsc || has_typescript_dep
}

/// The declared build-output entry: config.yml wins, then the package.json
/// start script, then the conventional default.
fn declared_entry(root: &Path) -> String {
    if let Ok(config) = ProjectConfig::load(root) {
        if config.mcp.runtime == Runtime::Node && !config.mcp.entry.is_empty() {
            return config.mcp.entry;
        }
    }

    if let Some(pkg) = read_package_json(root) {
        if let Some(start) = pkg["scripts"]["start"].as_str() {
            if let Some(path) = start.trim().strip_prefix("node ") {
                let path = path.trim();
                if !path.is_empty() {
                    return path.to_string();
                }
            }
        }
    }

    DEFAULT_ENTRY.to_string()
}

fn read_package_json(root: &Path) -> Option<serde_json::Value> {
    let content = fs::read_to_string(root.join("package.json")).ok()?;
    serde_json::from_str(&content).ok()
}

/// Run the build synchronously with inherited streams so compiler
/// diagnostics reach the user live. No retries: build failures are
/// deterministic.
pub fn run(root: &Path, plan: &BuildPlan) -> Result<(), PackError> {
    if which::which("npm").is_err() {
        return Err(PackError::Environment(
            "npm is required to build this project but was not found on PATH".to_string(),
        ));
    }

    println!("🔨 Building: npm run build");
    let success = ExecSpec::new("npm")
        .args(["run", "build"])
        .current_dir(root)
        .run_inherited()
        .map_err(|err| PackError::BuildFailed(err.to_string()))?;

    if !success {
        return Err(PackError::BuildFailed(
            "npm run build exited with a non-zero status".to_string(),
        ));
    }

    if !root.join(&plan.entry).exists() {
        return Err(PackError::BuildOutputMissing(plan.entry.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Language, ProjectOptions};
    use crate::templates;
    use std::fs;

    fn scaffold_into(dir: &Path, language: Language) {
        let options = ProjectOptions {
            name: "demo".to_string(),
            description: String::new(),
            author: String::new(),
            language,
            main_file_name: match language {
                Language::Python => "main.py".to_string(),
                Language::Typescript => "index.ts".to_string(),
            },
            readme: false,
            license: false,
        };
        for file in templates::project_files(&options).unwrap() {
            let path = dir.join(&file.relative_path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, file.content).unwrap();
        }
    }

    #[test]
    fn test_python_project_needs_no_build() {
        let dir = tempfile::tempdir().unwrap();
        scaffold_into(dir.path(), Language::Python);
        assert!(detect(dir.path()).is_none());
    }

    #[test]
    fn test_typescript_project_detected() {
        let dir = tempfile::tempdir().unwrap();
        scaffold_into(dir.path(), Language::Typescript);
        let plan = detect(dir.path()).unwrap();
        assert_eq!(plan.entry, "dist/index.js");
    }

    #[test]
    fn test_tsconfig_alone_triggers_detection() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        assert!(detect(dir.path()).is_some());
    }

    #[test]
    fn test_build_script_with_tsc_triggers_detection() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"scripts": {"build": "tsc --build"}}"#,
        )
        .unwrap();
        assert!(detect(dir.path()).is_some());
    }

    #[test]
    fn test_plain_node_project_not_detected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"scripts": {"start": "node server.js"}}"#,
        )
        .unwrap();
        assert!(detect(dir.path()).is_none());
    }

    #[test]
    fn test_entry_falls_back_to_start_script() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"scripts": {"build": "tsc -p .", "start": "node dist/server.js"}}"#,
        )
        .unwrap();
        let plan = detect(dir.path()).unwrap();
        assert_eq!(plan.entry, "dist/server.js");
    }
}
