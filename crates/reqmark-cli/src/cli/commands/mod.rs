//! CLI command handlers. Each command is in its own file.

mod completions;
mod import_har;
mod shell;

pub use completions::run_completions;
pub use import_har::run_import_har;
pub use shell::run_shell;
