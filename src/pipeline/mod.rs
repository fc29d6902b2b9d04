mod batch;
mod delta;
mod prompt;
mod report;
mod task;
mod validate;

// Re-export public interfaces
pub use batch::{AnnotationResult, BatchProcessor};
pub use delta::{comment_delta, count_comment_tokens};
pub use prompt::PromptBuilder;
pub use report::{BatchReport, FailureStage, FileFailure};
pub use task::{CommentStyle, FileTask};
pub use validate::{validate, RejectReason, Validation};
