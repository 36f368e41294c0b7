//! User-facing project options and their normalization rules.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Typescript,
}

impl Language {
    /// Parse a user-supplied language name, accepting short aliases.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "py" | "python" => Ok(Language::Python),
            "ts" | "typescript" => Ok(Language::Typescript),
            "js" | "javascript" => bail!(
                "The JavaScript template has been removed. Use --language typescript instead."
            ),
            other => bail!("Unknown language: {} (expected python or typescript)", other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Typescript => "TypeScript",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Typescript => "typescript",
        }
    }

    /// Source file extension for this language, including the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Python => ".py",
            Language::Typescript => ".ts",
        }
    }

    pub fn default_main(&self) -> &'static str {
        match self {
            Language::Python => "main.py",
            Language::Typescript => "index.ts",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectOptions {
    pub name: String,
    pub description: String,
    pub author: String,
    pub language: Language,
    pub main_file_name: String,
    pub readme: bool,
    pub license: bool,
}

/// Validate a project name for use as a directory name.
pub fn validate_project_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Project name is required");
    }
    if name.contains('/') || name.contains('\\') {
        bail!("Project name cannot include path separators");
    }
    Ok(())
}

/// Normalize the main file name: empty falls back to the language default,
/// a missing extension gets the language default, a wrong one is an error.
pub fn normalize_main_file_name(language: Language, raw: Option<&str>) -> Result<String> {
    let trimmed = raw.unwrap_or("").trim();
    let base = if trimmed.is_empty() {
        language.default_main().to_string()
    } else {
        trimmed.to_string()
    };

    match Path::new(&base).extension() {
        None => Ok(format!("{}{}", base, language.extension())),
        Some(_) if base.ends_with(language.extension()) => Ok(base),
        Some(_) => bail!("Main file should end with {}", language.extension()),
    }
}

/// Best-effort author detection from the ambient environment.
pub fn default_author() -> String {
    let candidates = [
        "GIT_AUTHOR_NAME",
        "GIT_COMMITTER_NAME",
        "USER",
        "USERNAME",
        "LOGNAME",
    ];

    for var in candidates {
        if let Ok(value) = env::var(var) {
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }

    "Your Name".to_string()
}
