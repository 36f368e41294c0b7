use anyhow::Result;
use glosc::pack;

pub fn execute() -> Result<()> {
    let cwd = std::env::current_dir()?;
    let artifact = pack::run(&cwd)?;
    println!("✅ {}", artifact.display());
    Ok(())
}
