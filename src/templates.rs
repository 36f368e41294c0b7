//! Template layer: turns a `ProjectOptions` record into the list of
//! `(relative_path, content)` pairs the scaffolder writes verbatim.

use anyhow::Result;
use chrono::Datelike;
use serde_json::json;

use crate::config::{js_file_name, ProjectConfig, CONFIG_FILE};
use crate::options::{Language, ProjectOptions};

#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub relative_path: String,
    pub content: String,
}

impl ProjectFile {
    fn new(relative_path: &str, content: String) -> Self {
        ProjectFile {
            relative_path: relative_path.to_string(),
            content,
        }
    }
}

/// Full file set for a project, driven by the selected options.
pub fn project_files(options: &ProjectOptions) -> Result<Vec<ProjectFile>> {
    let mut files = Vec::new();

    let config = ProjectConfig::from_options(options);
    files.push(ProjectFile::new(CONFIG_FILE, config.to_yaml()?));
    files.push(ProjectFile::new(".gitignore", gitignore(options.language)));

    if options.readme {
        files.push(ProjectFile::new("README.md", readme(options)));
    }

    if options.license {
        files.push(ProjectFile::new("LICENSE", mit_license(&options.author)));
    }

    match options.language {
        Language::Python => {
            files.push(ProjectFile::new(
                &format!("src/{}", options.main_file_name),
                python_main(&options.name),
            ));
            files.push(ProjectFile::new("requirements.txt", "mcp\n".to_string()));
            files.push(ProjectFile::new("pyproject.toml", pyproject(options)));
        }
        Language::Typescript => {
            files.push(ProjectFile::new(
                &format!("src/{}", options.main_file_name),
                typescript_main(&options.name),
            ));
            files.push(ProjectFile::new("package.json", package_json(options)?));
            files.push(ProjectFile::new("tsconfig.json", tsconfig()?));
        }
    }

    Ok(files)
}

fn gitignore(language: Language) -> String {
    match language {
        Language::Python => "__pycache__/\n*.pyc\n.venv/\ndist/\n".to_string(),
        Language::Typescript => "node_modules/\ndist/\n".to_string(),
    }
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

fn mit_license(author: &str) -> String {
    let year = chrono::Local::now().year();
    let owner = author.trim();
    let owner = if owner.is_empty() { "Copyright Holder" } else { owner };

    format!(
        "MIT License\n\nCopyright (c) {year} {owner}\n\nPermission is hereby granted, free of charge, to any person obtaining a copy\nof this software and associated documentation files (the \"Software\"), to deal\nin the Software without restriction, including without limitation the rights\nto use, copy, modify, merge, publish, distribute, sublicense, and/or sell\ncopies of the Software, and to permit persons to whom the Software is\nfurnished to do so, subject to the following conditions:\n\nThe above copyright notice and this permission notice shall be included in all\ncopies or substantial portions of the Software.\n\nTHE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR\nIMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,\nFITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE\nAUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER\nLIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,\nOUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE\nSOFTWARE.\n"
    )
}

fn readme(options: &ProjectOptions) -> String {
    let entry = format!("src/{}", options.main_file_name);
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", options.name));
    md.push_str(&format!("{}\n\n", options.description));
    md.push_str(&format!("## Author\n\n{}\n\n", options.author));
    md.push_str(&format!("## Language\n\n{}\n\n", options.language.label()));
    md.push_str(&format!("## Entry\n\n- {}\n\n", entry));
    md.push_str("## MCP Tools\n\n- get_current_time: Returns the current time (UTC, ISO 8601)\n\n");

    match options.language {
        Language::Python => {
            md.push_str("## Run (Python)\n\n");
            md.push_str("1) Install deps\n\n```sh\npython -m pip install -r requirements.txt\n```\n\n");
            md.push_str(&format!("2) Run the MCP server (stdio)\n\n```sh\npython {}\n```\n\n", entry));
        }
        Language::Typescript => {
            md.push_str("## Run (TypeScript)\n\n");
            md.push_str("1) Install deps\n\n```sh\nnpm install\n```\n\n");
            md.push_str("2) Build\n\n```sh\nnpm run build\n```\n\n");
            md.push_str("3) Run the MCP server (stdio)\n\n```sh\nnpm start\n```\n\n");
        }
    }

    md.push_str("This server speaks MCP over stdio. Connect using an MCP client (e.g. an editor integration).\n\n");
    md.push_str("## Config\n\n- config.yml\n");
    md
}

fn python_main(project_name: &str) -> String {
    let safe_name = escape_quotes(project_name.trim());
    let safe_name = if safe_name.is_empty() { "mcp-server".to_string() } else { safe_name };

    PYTHON_MAIN_TEMPLATE.replace("__SERVER_NAME__", &safe_name)
}

const PYTHON_MAIN_TEMPLATE: &str = r#"from datetime import datetime, timezone

from mcp.server.fastmcp import FastMCP

# Minimal MCP server (stdio)

mcp = FastMCP("__SERVER_NAME__")


@mcp.tool()
async def get_current_time() -> str:
    """Return the current time in UTC (ISO 8601)."""

    return datetime.now(timezone.utc).isoformat()


def main():
    mcp.run(transport="stdio")


if __name__ == "__main__":
    main()
"#;

fn typescript_main(project_name: &str) -> String {
    let safe_name = escape_quotes(project_name.trim());
    let safe_name = if safe_name.is_empty() { "mcp-server".to_string() } else { safe_name };

    TYPESCRIPT_MAIN_TEMPLATE.replace("__SERVER_NAME__", &safe_name)
}

const TYPESCRIPT_MAIN_TEMPLATE: &str = r#"import { McpServer } from "@modelcontextprotocol/sdk/server/mcp.js";
import { StdioServerTransport } from "@modelcontextprotocol/sdk/server/stdio.js";

const server = new McpServer({
  name: "__SERVER_NAME__",
  version: "0.1.0",
});

server.registerTool(
  "get_current_time",
  {
    title: "Get Current Time",
    description: "Return the current time in UTC (ISO 8601)",
    inputSchema: {},
  },
  async () => {
    return {
      content: [
        {
          type: "text",
          text: new Date().toISOString(),
        },
      ],
    };
  },
);

async function main() {
  const transport = new StdioServerTransport();
  await server.connect(transport);
  console.error("MCP Server running on stdio");
}

main().catch((error) => {
  console.error("Fatal error in main():", error);
  process.exit(1);
});
"#;

fn pyproject(options: &ProjectOptions) -> String {
    let safe_name: String = {
        let trimmed = options.name.trim();
        let name = if trimmed.is_empty() { "glosc-project" } else { trimmed };
        name.split_whitespace().collect::<Vec<_>>().join("-")
    };
    let safe_author = escape_quotes(options.author.trim());

    let mut toml = String::new();
    toml.push_str("# Minimal pyproject.toml (adjust as needed)\n\n");
    toml.push_str("[project]\n");
    toml.push_str(&format!("name = \"{}\"\n", safe_name));
    toml.push_str("version = \"0.1.0\"\n");
    toml.push_str("description = \"\"\n");
    if !safe_author.is_empty() {
        toml.push_str(&format!("authors = [{{ name = \"{}\" }}]\n", safe_author));
    }
    toml.push_str("requires-python = \">=3.10\"\n");
    toml.push_str("dependencies = [\n  \"mcp\",\n]\n\n");
    toml.push_str("[build-system]\n");
    toml.push_str("requires = [\"setuptools>=61.0\"]\n");
    toml.push_str("build-backend = \"setuptools.build_meta\"\n");
    toml
}

fn package_json(options: &ProjectOptions) -> Result<String> {
    let dist_entry = format!("dist/{}", js_file_name(&options.main_file_name));

    let pkg = json!({
        "name": options.name,
        "version": "0.1.0",
        "description": options.description,
        "author": options.author,
        "private": true,
        "type": "module",
        "scripts": {
            "build": "tsc -p .",
            "start": format!("node {}", dist_entry),
        },
        "dependencies": {
            "@modelcontextprotocol/sdk": "^1.24.3",
        },
        "devDependencies": {
            "typescript": "^5.9.3",
            "@types/node": "^22.19.2",
        },
    });

    Ok(serde_json::to_string_pretty(&pkg)? + "\n")
}

fn tsconfig() -> Result<String> {
    let config = json!({
        "compilerOptions": {
            "target": "ES2022",
            "module": "Node16",
            "strict": true,
            "outDir": "dist",
            "rootDir": "src",
            "esModuleInterop": true,
            "moduleResolution": "Node16",
            "types": ["node"],
            "skipLibCheck": true,
            "forceConsistentCasingInFileNames": true,
        },
        "include": ["src/**/*.ts"],
    });

    Ok(serde_json::to_string_pretty(&config)? + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(language: Language) -> ProjectOptions {
        ProjectOptions {
            name: "demo".to_string(),
            description: "A demo project".to_string(),
            author: "Ada Lovelace".to_string(),
            language,
            main_file_name: match language {
                Language::Python => "main.py".to_string(),
                Language::Typescript => "index.ts".to_string(),
            },
            readme: true,
            license: true,
        }
    }

    fn paths(files: &[ProjectFile]) -> Vec<&str> {
        files.iter().map(|f| f.relative_path.as_str()).collect()
    }

    #[test]
    fn test_python_file_set() {
        let files = project_files(&options(Language::Python)).unwrap();
        assert_eq!(
            paths(&files),
            vec![
                "config.yml",
                ".gitignore",
                "README.md",
                "LICENSE",
                "src/main.py",
                "requirements.txt",
                "pyproject.toml",
            ]
        );
    }

    #[test]
    fn test_typescript_file_set() {
        let files = project_files(&options(Language::Typescript)).unwrap();
        assert_eq!(
            paths(&files),
            vec![
                "config.yml",
                ".gitignore",
                "README.md",
                "LICENSE",
                "src/index.ts",
                "package.json",
                "tsconfig.json",
            ]
        );
    }

    #[test]
    fn test_optional_files_omitted() {
        let mut opts = options(Language::Python);
        opts.readme = false;
        opts.license = false;
        let files = project_files(&opts).unwrap();
        assert!(!paths(&files).contains(&"README.md"));
        assert!(!paths(&files).contains(&"LICENSE"));
    }

    #[test]
    fn test_config_yml_declares_runtime() {
        let files = project_files(&options(Language::Python)).unwrap();
        let config = files.iter().find(|f| f.relative_path == "config.yml").unwrap();
        let parsed: crate::config::ProjectConfig =
            serde_yaml::from_str(&config.content).unwrap();
        assert_eq!(parsed.mcp.runtime, crate::config::Runtime::Python);
        assert_eq!(parsed.mcp.entry, "src/main.py");
    }

    #[test]
    fn test_package_json_has_build_script() {
        let files = project_files(&options(Language::Typescript)).unwrap();
        let pkg = files.iter().find(|f| f.relative_path == "package.json").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&pkg.content).unwrap();
        assert_eq!(parsed["scripts"]["build"], "tsc -p .");
        assert_eq!(parsed["scripts"]["start"], "node dist/index.js");
        assert!(parsed["devDependencies"]["typescript"].is_string());
    }

    #[test]
    fn test_gitignore_excludes_dist() {
        for language in [Language::Python, Language::Typescript] {
            let mut opts = options(language);
            opts.readme = false;
            let files = project_files(&opts).unwrap();
            let ignore = files.iter().find(|f| f.relative_path == ".gitignore").unwrap();
            assert!(ignore.content.contains("dist/"));
        }
    }

    #[test]
    fn test_license_names_author_and_year() {
        let files = project_files(&options(Language::Python)).unwrap();
        let license = files.iter().find(|f| f.relative_path == "LICENSE").unwrap();
        assert!(license.content.contains("Ada Lovelace"));
        let year = chrono::Local::now().year().to_string();
        assert!(license.content.contains(&year));
    }

    #[test]
    fn test_server_name_embedded() {
        let files = project_files(&options(Language::Typescript)).unwrap();
        let main = files.iter().find(|f| f.relative_path == "src/index.ts").unwrap();
        assert!(main.content.contains("name: \"demo\""));
    }
}
