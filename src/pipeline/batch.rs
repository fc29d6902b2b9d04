use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::completion::CompletionClient;

use super::delta::comment_delta;
use super::prompt::PromptBuilder;
use super::report::{BatchReport, FailureStage, FileFailure};
use super::task::FileTask;
use super::validate::{validate, RejectReason, Validation};

/// Outcome of processing a single task
#[derive(Debug)]
pub enum AnnotationResult {
    Accepted {
        annotated: String,
        comments_added: i64,
    },
    Rejected(RejectReason),
    Failed {
        stage: FailureStage,
        error: String,
    },
}

/// Runs the annotation pipeline over an ordered task list.
///
/// Processing is strictly sequential: files are handled one at a time in
/// submission order, with no concurrent completion requests or writes.
/// Failure isolation is the defining property: no single file's failure
/// prevents the remaining files from being attempted, and the report is
/// the only state that survives the run.
pub struct BatchProcessor {
    client: Arc<dyn CompletionClient>,
}

impl BatchProcessor {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Process every task and return the aggregate report.
    ///
    /// Counters are only incremented after the annotated content has been
    /// written back successfully; an accepted result whose write fails is
    /// recorded as a failure instead.
    pub async fn process(&self, tasks: &[FileTask]) -> BatchReport {
        let mut report = BatchReport::new();

        if tasks.is_empty() {
            return report;
        }

        info!(
            "Annotating {} files via the {} backend",
            tasks.len(),
            self.client.client_name()
        );

        let progress = ProgressBar::new(tasks.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for task in tasks {
            progress.set_message(task.path.display().to_string());

            match self.annotate_file(task).await {
                AnnotationResult::Accepted {
                    annotated,
                    comments_added,
                } => match tokio::fs::write(&task.path, &annotated).await {
                    Ok(()) => {
                        report.files_processed += 1;
                        report.comments_added += comments_added;
                        debug!(
                            "Annotated {} ({:+} comments)",
                            task.path.display(),
                            comments_added
                        );
                    }
                    Err(e) => {
                        warn!("Failed to write {}: {}", task.path.display(), e);
                        report.failures.push(FileFailure {
                            path: task.path.clone(),
                            stage: FailureStage::Write,
                            reason: e.to_string(),
                        });
                    }
                },
                AnnotationResult::Rejected(reason) => {
                    warn!("Skipping {}: {}", task.path.display(), reason);
                    report.failures.push(FileFailure {
                        path: task.path.clone(),
                        stage: FailureStage::Validation,
                        reason: reason.to_string(),
                    });
                }
                AnnotationResult::Failed { stage, error } => {
                    warn!("Error processing {} ({}): {}", task.path.display(), stage, error);
                    report.failures.push(FileFailure {
                        path: task.path.clone(),
                        stage,
                        reason: error,
                    });
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        info!("{}", report.summary());

        report
    }

    /// Run one task up to (but not including) the write-back
    async fn annotate_file(&self, task: &FileTask) -> AnnotationResult {
        let original = match tokio::fs::read_to_string(&task.path).await {
            Ok(content) => content,
            Err(e) => {
                return AnnotationResult::Failed {
                    stage: FailureStage::Read,
                    error: e.to_string(),
                }
            }
        };

        let prompt = PromptBuilder::build(&original, &task.language_hint, task.style);

        let candidate = match self.client.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                return AnnotationResult::Failed {
                    stage: FailureStage::Completion,
                    error: e.to_string(),
                }
            }
        };

        match validate(&original, &candidate) {
            Validation::Accepted => AnnotationResult::Accepted {
                comments_added: comment_delta(&original, &candidate),
                annotated: candidate,
            },
            Validation::Rejected(reason) => AnnotationResult::Rejected(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::MockClient;
    use crate::pipeline::CommentStyle;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn task(path: PathBuf) -> FileTask {
        FileTask::new(path, CommentStyle::Basic)
    }

    #[tokio::test]
    async fn test_accepted_completion_is_written_and_counted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("add.js");
        fs::write(&path, "function add(a,b){return a+b;}").unwrap();

        let client = MockClient::new();
        client.push_reply("// Adds two numbers\nfunction add(a,b){return a+b;}");

        let processor = BatchProcessor::new(Arc::new(client));
        let report = processor.process(&[task(path.clone())]).await;

        assert_eq!(report.files_processed, 1);
        assert_eq!(report.comments_added, 1);
        assert!(!report.has_failures());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "// Adds two numbers\nfunction add(a,b){return a+b;}"
        );
    }

    #[tokio::test]
    async fn test_empty_response_rejected_without_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("add.js");
        let original = "function add(a,b){return a+b;}";
        fs::write(&path, original).unwrap();

        let client = MockClient::new();
        client.push_reply("");

        let processor = BatchProcessor::new(Arc::new(client));
        let report = processor.process(&[task(path.clone())]).await;

        assert_eq!(report.files_processed, 0);
        assert_eq!(report.comments_added, 0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, FailureStage::Validation);
        assert!(report.failures[0].reason.contains("empty response"));

        // File untouched
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_truncated_response_rejected_without_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("add.js");
        let original = "function add(a,b){return a+b;}";
        fs::write(&path, original).unwrap();

        let client = MockClient::new();
        client.push_reply(&original[..original.len() - 5]);

        let processor = BatchProcessor::new(Arc::new(client));
        let report = processor.process(&[task(path.clone())]).await;

        assert_eq!(report.files_processed, 0);
        assert_eq!(report.failures[0].stage, FailureStage::Validation);
        assert!(report.failures[0].reason.contains("shorter than input"));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_unreadable_file_does_not_abort_batch() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("deleted.js");
        let path = dir.path().join("ok.js");
        fs::write(&path, "function f(){}").unwrap();

        let client = MockClient::new();
        // Only the readable file reaches the service
        client.push_reply("// Does nothing\nfunction f(){}");

        let processor = BatchProcessor::new(Arc::new(client));
        let report = processor
            .process(&[task(missing.clone()), task(path)])
            .await;

        assert_eq!(report.files_processed, 1);
        assert_eq!(report.comments_added, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, FailureStage::Read);
        assert_eq!(report.failures[0].path, missing);
    }

    #[tokio::test]
    async fn test_completion_failure_isolated_per_file() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.js");
        let second = dir.path().join("b.js");
        fs::write(&first, "function a(){}").unwrap();
        fs::write(&second, "function b(){}").unwrap();

        let client = MockClient::new();
        client.push_failure("connection refused");
        client.push_reply("// B\nfunction b(){}");

        let processor = BatchProcessor::new(Arc::new(client));
        let report = processor
            .process(&[task(first), task(second.clone())])
            .await;

        assert_eq!(report.files_processed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, FailureStage::Completion);
        assert_eq!(
            fs::read_to_string(&second).unwrap(),
            "// B\nfunction b(){}"
        );
    }

    #[tokio::test]
    async fn test_empty_task_list_returns_zero_report() {
        let processor = BatchProcessor::new(Arc::new(MockClient::new()));
        let report = processor.process(&[]).await;

        assert_eq!(report.files_processed, 0);
        assert_eq!(report.comments_added, 0);
        assert!(!report.has_failures());
    }

    #[tokio::test]
    async fn test_all_failures_still_returns_report() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.js");
        fs::write(&a, "x").unwrap();
        fs::write(&b, "y").unwrap();

        // Systemic outage: every call fails
        let client = MockClient::new();
        client.push_failure("service down");
        client.push_failure("service down");

        let processor = BatchProcessor::new(Arc::new(client));
        let report = processor.process(&[task(a), task(b)]).await;

        assert_eq!(report.files_processed, 0);
        assert_eq!(report.comments_added, 0);
        assert_eq!(report.failures.len(), 2);
    }
}
