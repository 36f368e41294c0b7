use anyhow::Result;
use clap::{Parser, Subcommand};

use glosc::options::Language;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Scaffold and package MCP server projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project skeleton
    New {
        /// Project name
        name: String,

        /// Template language (python, typescript)
        #[arg(long, value_parser = Language::parse, default_value = "typescript")]
        language: Language,

        /// Main file name (defaults to main.py / index.ts)
        #[arg(long)]
        main: Option<String>,

        /// Project description
        #[arg(long)]
        description: Option<String>,

        /// Author name (defaults to git/env identity)
        #[arg(long)]
        author: Option<String>,

        /// Skip README.md generation
        #[arg(long)]
        no_readme: bool,

        /// Skip LICENSE generation
        #[arg(long)]
        no_license: bool,

        /// Skip git repository initialization
        #[arg(long)]
        no_git: bool,
    },

    /// Package the enclosing project into a distributable zip
    Pack,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::New {
            name,
            language,
            main,
            description,
            author,
            no_readme,
            no_license,
            no_git,
        } => {
            commands::new::execute(
                name,
                language,
                main,
                description,
                author,
                !no_readme,
                !no_license,
                !no_git,
            )?;
        }
        Commands::Pack => {
            commands::pack::execute()?;
        }
    }

    Ok(())
}
