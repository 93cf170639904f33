//! View tree traversal.
//!
//! # Responsibilities
//! - Enumerate every leaf entry under the view root
//! - Derive the canonical path (`/a/b/name`) of each view file
//!
//! # Design Decisions
//! - Iterative walk (walkdir) accumulating into a list; no shared mutable state
//! - Siblings are visited sorted by file name so registration order is stable
//!   across platforms
//! - Symlinks are not followed: a link is a leaf, whatever it points to
//! - Only the last extension is stripped (`a.b.html` → `a.b`)

use std::fs;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// View tree walk failure. All variants are fatal at setup.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("view root {path} is not accessible: {source}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("view root {path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("failed to read view tree: {0}")]
    Entry(#[from] walkdir::Error),

    #[error("view path {path} is not valid UTF-8")]
    NonUtf8 { path: PathBuf },
}

/// One leaf file found under the view root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFile {
    /// Location on disk.
    pub path: PathBuf,

    /// Root-relative path without extension, `/`-separated, leading `/`.
    pub canonical_path: String,
}

/// Walk `root` and return its view files in traversal order.
pub fn walk(root: &Path) -> Result<Vec<ViewFile>, WalkError> {
    let metadata = fs::metadata(root).map_err(|source| WalkError::RootUnavailable {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let canonical_path = canonical_path(relative)?;
        files.push(ViewFile {
            path: entry.into_path(),
            canonical_path,
        });
    }

    Ok(files)
}

/// Canonical path for a root-relative file path.
pub fn canonical_path(relative: &Path) -> Result<String, WalkError> {
    let non_utf8 = || WalkError::NonUtf8 {
        path: relative.to_path_buf(),
    };

    let mut canonical = String::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            if let Component::Normal(segment) = component {
                canonical.push('/');
                canonical.push_str(segment.to_str().ok_or_else(non_utf8)?);
            }
        }
    }

    let stem = relative.file_stem().ok_or_else(non_utf8)?;
    canonical.push('/');
    canonical.push_str(stem.to_str().ok_or_else(non_utf8)?);

    Ok(canonical)
}
