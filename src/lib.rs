pub mod config;
pub mod exec;
pub mod git;
pub mod options;
pub mod pack;
pub mod scaffold;
pub mod templates;

// Re-export commonly used types
pub use config::ProjectConfig;
pub use options::{Language, ProjectOptions};
