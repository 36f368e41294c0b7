//! Project configuration (`config.yml`) written at scaffold time and read
//! back by the packaging pipeline.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::options::{Language, ProjectOptions};

pub const CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub description: String,
    pub author: String,
    pub language: Language,
    pub mcp: McpConfig,
}

/// Execution descriptor: how a client should launch the scaffolded server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    pub runtime: Runtime,
    pub entry: String,
    pub cwd: String,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    Python,
    Node,
}

impl ProjectConfig {
    pub fn from_options(options: &ProjectOptions) -> Self {
        let (runtime, entry) = match options.language {
            Language::Python => (
                Runtime::Python,
                format!("src/{}", options.main_file_name),
            ),
            // Node loads the compiled entry, not the TypeScript source
            Language::Typescript => (
                Runtime::Node,
                format!("dist/{}", js_file_name(&options.main_file_name)),
            ),
        };

        ProjectConfig {
            name: options.name.clone(),
            description: options.description.clone(),
            author: options.author.clone(),
            language: options.language,
            mcp: McpConfig {
                runtime,
                entry,
                cwd: ".".to_string(),
                env: BTreeMap::new(),
                args: Vec::new(),
            },
        }
    }

    /// Read `config.yml` from a project root.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize project config")
    }
}

/// Map a TypeScript source name to its compiled JavaScript name.
pub fn js_file_name(main_file_name: &str) -> String {
    match main_file_name.strip_suffix(".ts") {
        Some(stem) => format!("{}.js", stem),
        None => main_file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(language: Language, main: &str) -> ProjectOptions {
        ProjectOptions {
            name: "demo".to_string(),
            description: "A demo".to_string(),
            author: "Ada".to_string(),
            language,
            main_file_name: main.to_string(),
            readme: true,
            license: true,
        }
    }

    #[test]
    fn test_python_entry_points_at_source() {
        let config = ProjectConfig::from_options(&options(Language::Python, "main.py"));
        assert_eq!(config.mcp.runtime, Runtime::Python);
        assert_eq!(config.mcp.entry, "src/main.py");
    }

    #[test]
    fn test_typescript_entry_points_at_compiled_output() {
        let config = ProjectConfig::from_options(&options(Language::Typescript, "index.ts"));
        assert_eq!(config.mcp.runtime, Runtime::Node);
        assert_eq!(config.mcp.entry, "dist/index.js");
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ProjectConfig::from_options(&options(Language::Python, "main.py"));
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("runtime: python"));
        let parsed: ProjectConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.name, "demo");
        assert_eq!(parsed.mcp.entry, "src/main.py");
    }

    #[test]
    fn test_js_file_name() {
        assert_eq!(js_file_name("index.ts"), "index.js");
        assert_eq!(js_file_name("server.mjs"), "server.mjs");
    }
}
