use std::collections::BTreeMap;
use std::path::PathBuf;

/// Stage where a file dropped out of the batch
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum FailureStage {
    Read,
    Completion,
    Validation,
    Write,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStage::Read => write!(f, "File Read"),
            FailureStage::Completion => write!(f, "Completion"),
            FailureStage::Validation => write!(f, "Validation"),
            FailureStage::Write => write!(f, "File Write"),
        }
    }
}

/// A file that did not make it through the batch
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub stage: FailureStage,
    pub reason: String,
}

/// Aggregate outcome of one batch invocation.
///
/// Created empty at batch start, mutated incrementally by the processor,
/// returned at batch end. Counters only reflect files that were accepted
/// AND written back; nothing persists across runs.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files_processed: usize,
    pub comments_added: i64,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any files failed or were rejected
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Get a summary string of the results
    pub fn summary(&self) -> String {
        if self.failures.is_empty() {
            format!(
                "Annotated {} files, added {} comments",
                self.files_processed, self.comments_added
            )
        } else {
            format!(
                "Annotated {} files ({} skipped), added {} comments",
                self.files_processed,
                self.failures.len(),
                self.comments_added
            )
        }
    }

    /// Print a user-facing summary, failures grouped by stage
    pub fn print_summary(&self) {
        if self.failures.is_empty() {
            println!("✅ {}", self.summary());
            return;
        }

        println!("⚠️  {}", self.summary());
        println!();

        let mut by_stage: BTreeMap<FailureStage, Vec<&FileFailure>> = BTreeMap::new();
        for failure in &self.failures {
            by_stage.entry(failure.stage).or_default().push(failure);
        }

        for (stage, failures) in &by_stage {
            println!("  {}: {} files", stage, failures.len());

            // Show up to 5 examples per stage
            for failure in failures.iter().take(5) {
                println!("    - {}: {}", failure.path.display(), failure.reason);
            }

            if failures.len() > 5 {
                println!("    ... and {} more", failures.len() - 5);
            }
        }
    }
}
