use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::path::{Path, PathBuf};

/// Finds the files to parse below a root directory by glob pattern.
pub struct Scanner {
    root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl Scanner {
    pub fn new(root: PathBuf, include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            root,
            include_set: build_globset(include)?,
            exclude_set: build_globset(exclude)?,
        })
    }

    /// Files below the root matching an include pattern and no exclude
    /// pattern, sorted by path. .gitignore rules are honoured.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if let Some(path) = self.process_entry(entry.path()) {
                        files.push(path);
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        files.sort();
        files
    }

    fn process_entry(&self, path: &Path) -> Option<PathBuf> {
        if path == self.root || path.is_dir() {
            return None;
        }
        if path.components().any(|c| c.as_os_str() == ".git") {
            return None;
        }

        let relative = diff_paths(path, &self.root)?;
        if self.exclude_set.is_match(&relative) || !self.include_set.is_match(&relative) {
            return None;
        }

        Some(path.to_path_buf())
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).with_context(|| format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
