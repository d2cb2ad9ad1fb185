pub mod language_model;
pub mod source_control;

pub use language_model::{CompletionError, LanguageModelService};
pub use source_control::SourceControlService;
