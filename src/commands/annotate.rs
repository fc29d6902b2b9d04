//! Annotate command implementation.
//!
//! Resolves the file scope (explicit list, glob pattern, or all discovered
//! files), shows what was found, and runs the batch annotation pipeline
//! over every accessible file.

use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::completion;
use crate::pipeline::{BatchProcessor, CommentStyle, FileTask};
use crate::selector::FileSelector;
use crate::Config;

/// Run the annotate command.
///
/// # Arguments
///
/// * `pattern` - Optional glob pattern restricting the scope
/// * `files` - Explicit file list; overrides the pattern when non-empty
/// * `style` - Comment verbosity applied to every file in the batch
pub async fn run(
    pattern: Option<String>,
    files: Vec<PathBuf>,
    style: CommentStyle,
) -> Result<()> {
    let root = env::current_dir()?;
    let config = Config::load(&root)?;
    let selector = FileSelector::new(root.clone(), &config.selector);

    // Explicitly named files bypass discovery; they were chosen on purpose
    let candidates: Vec<PathBuf> = if !files.is_empty() {
        files
            .into_iter()
            .map(|p| if p.is_absolute() { p } else { root.join(p) })
            .collect()
    } else if let Some(pattern) = &pattern {
        selector.discover_pattern(pattern)?
    } else {
        selector.discover()
    };

    if candidates.is_empty() {
        println!("No files matched. Nothing to annotate.");
        return Ok(());
    }

    print_structure(&root, &candidates);

    let accessible = selector.filter_accessible(candidates);

    if accessible.is_empty() {
        bail!("No valid files to process after the accessibility check");
    }

    let client = completion::create_client(&config.completion)?;

    let tasks: Vec<FileTask> = accessible
        .into_iter()
        .map(|path| FileTask::new(path, style))
        .collect();

    println!();
    println!("Annotating {} files ({} style)...", tasks.len(), style);

    let processor = BatchProcessor::new(client);
    let report = processor.process(&tasks).await;

    println!();
    report.print_summary();

    Ok(())
}

/// Show the discovered files grouped by extension.
///
/// Presentation only; the pipeline works off the flat ordered list.
fn print_structure(root: &Path, paths: &[PathBuf]) {
    let mut by_extension: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for path in paths {
        let label = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_else(|| "(no extension)".to_string());
        let display = path.strip_prefix(root).unwrap_or(path).display().to_string();
        by_extension.entry(label).or_default().push(display);
    }

    println!("Found {} files in your project:", paths.len());

    for (label, files) in &by_extension {
        println!("  {}: {} files", label, files.len());

        for file in files.iter().take(3) {
            println!("    {}", file);
        }

        if files.len() > 3 {
            println!("    ... and {} more", files.len() - 3);
        }
    }
}
