//! CLI commands

mod check;
mod completions;
mod render;
mod source;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use render::RenderCommand;
pub use source::SourceArgs;
