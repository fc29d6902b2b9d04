use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::SelectorConfig;

/// Resolves the set of files eligible for annotation.
///
/// Discovery respects .gitignore, skips configured infrastructure
/// directories, and filters by extension. Candidates are additionally
/// checked for accessibility before the batch runs, since the pipeline
/// writes each annotated file back in place.
pub struct FileSelector {
    root: PathBuf,
    extensions: HashSet<String>,
    exclude_dirs: Vec<String>,
}

impl FileSelector {
    /// Create a new FileSelector with the given root directory and configuration
    pub fn new(root: PathBuf, config: &SelectorConfig) -> Self {
        Self {
            root,
            extensions: config.extensions.iter().cloned().collect(),
            exclude_dirs: config.exclude_dirs.clone(),
        }
    }

    /// Discover all candidate files under the root, sorted for
    /// deterministic batch ordering
    pub fn discover(&self) -> Vec<PathBuf> {
        let mut builder = WalkBuilder::new(&self.root);

        builder.git_ignore(true);
        builder.git_global(true);
        builder.git_exclude(true);
        builder.hidden(true);

        let mut files: Vec<PathBuf> = builder
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .filter(|entry| !is_excluded(entry.path(), &self.exclude_dirs))
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(OsStr::to_str)
                    .map(|ext| self.extensions.contains(ext))
                    .unwrap_or(false)
            })
            .map(|entry| entry.into_path())
            .collect();

        files.sort();
        files
    }

    /// Expand a glob pattern relative to the root, dropping anything under
    /// an excluded directory
    pub fn discover_pattern(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let full_pattern = self.root.join(pattern);
        let full_pattern = full_pattern
            .to_str()
            .with_context(|| format!("Pattern is not valid UTF-8: {:?}", full_pattern))?;

        let mut files: Vec<PathBuf> = glob::glob(full_pattern)
            .with_context(|| format!("Invalid glob pattern: {}", pattern))?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .filter(|path| !is_excluded(path, &self.exclude_dirs))
            .collect();

        files.sort();
        Ok(files)
    }

    /// Drop any path that cannot currently be opened for both reading and
    /// writing, with a non-fatal warning per dropped path
    pub fn filter_accessible(&self, paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths
            .into_iter()
            .filter(|path| {
                match OpenOptions::new().read(true).write(true).open(path) {
                    Ok(_) => true,
                    Err(e) => {
                        warn!("File not accessible, skipping: {}: {}", path.display(), e);
                        false
                    }
                }
            })
            .collect()
    }
}

fn is_excluded(path: &Path, exclude_dirs: &[String]) -> bool {
    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .map(|name| exclude_dirs.iter().any(|dir| dir == name))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn test_config() -> SelectorConfig {
        SelectorConfig {
            extensions: vec!["js".to_string(), "py".to_string()],
            exclude_dirs: vec!["node_modules".to_string(), "dist".to_string()],
        }
    }

    #[test]
    fn test_discover_filters_extensions() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("app.js"), "console.log('hi')").unwrap();
        fs::write(dir.path().join("tool.py"), "print('hi')").unwrap();
        fs::write(dir.path().join("readme.md"), "# Readme").unwrap();

        let selector = FileSelector::new(dir.path().to_path_buf(), &test_config());
        let files = selector.discover();

        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_discover_skips_excluded_dirs() {
        let dir = tempdir().unwrap();
        let deps = dir.path().join("node_modules").join("pkg");
        fs::create_dir_all(&deps).unwrap();

        fs::write(dir.path().join("app.js"), "x").unwrap();
        fs::write(deps.join("index.js"), "y").unwrap();

        let selector = FileSelector::new(dir.path().to_path_buf(), &test_config());
        let files = selector.discover();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }

    #[test]
    fn test_discover_is_sorted() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.js"), "x").unwrap();
        fs::write(dir.path().join("a.js"), "x").unwrap();
        fs::write(dir.path().join("c.js"), "x").unwrap();

        let selector = FileSelector::new(dir.path().to_path_buf(), &test_config());
        let files = selector.discover();

        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_discover_pattern() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();

        fs::write(src.join("app.js"), "x").unwrap();
        fs::write(src.join("app.py"), "x").unwrap();
        fs::write(dir.path().join("top.js"), "x").unwrap();

        let selector = FileSelector::new(dir.path().to_path_buf(), &test_config());
        let files = selector.discover_pattern("src/*.js").unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }

    #[test]
    fn test_discover_pattern_respects_exclusions() {
        let dir = tempdir().unwrap();
        let deps = dir.path().join("node_modules");
        fs::create_dir_all(&deps).unwrap();

        fs::write(deps.join("dep.js"), "x").unwrap();
        fs::write(dir.path().join("app.js"), "x").unwrap();

        let selector = FileSelector::new(dir.path().to_path_buf(), &test_config());
        let files = selector.discover_pattern("**/*.js").unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }

    #[test]
    fn test_filter_accessible_drops_missing() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("present.js");
        fs::write(&present, "x").unwrap();

        let selector = FileSelector::new(dir.path().to_path_buf(), &test_config());
        let files = selector.filter_accessible(vec![
            present.clone(),
            dir.path().join("deleted.js"),
        ]);

        assert_eq!(files, vec![present]);
    }
}
