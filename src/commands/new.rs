use anyhow::Result;
use glosc::options::{self, Language, ProjectOptions};
use glosc::scaffold;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    name: String,
    language: Language,
    main: Option<String>,
    description: Option<String>,
    author: Option<String>,
    readme: bool,
    license: bool,
    init_git: bool,
) -> Result<()> {
    options::validate_project_name(&name)?;

    let project_options = ProjectOptions {
        name: name.trim().to_string(),
        description: description
            .unwrap_or_else(|| "A brief description of your project".to_string())
            .trim()
            .to_string(),
        author: author.unwrap_or_else(options::default_author).trim().to_string(),
        language,
        main_file_name: options::normalize_main_file_name(language, main.as_deref())?,
        readme,
        license,
    };

    println!(
        "🎨 Creating {} project: {}",
        project_options.language.label(),
        project_options.name
    );

    let cwd = std::env::current_dir()?;
    let root = scaffold::scaffold_project(&cwd, &project_options, init_git)?;

    println!("\nCreated project at: {}", root.display());
    Ok(())
}
