use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::FolderError;

/// A file seen during one scan. Never carried across cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// File name for logging; lossy if the name is not valid UTF-8.
    pub name: String,
    /// Exact path to dispatch.
    pub path: PathBuf,
}

/// Check that `folder` exists, is a directory and can be listed.
pub fn check_folder(folder: &Path) -> Result<(), FolderError> {
    let metadata = fs::metadata(folder).map_err(|source| match source.kind() {
        ErrorKind::NotFound => FolderError::Missing {
            path: folder.to_path_buf(),
        },
        _ => FolderError::Unreadable {
            path: folder.to_path_buf(),
            source,
        },
    })?;

    if !metadata.is_dir() {
        return Err(FolderError::NotDirectory {
            path: folder.to_path_buf(),
        });
    }

    fs::read_dir(folder).map_err(|source| FolderError::Unreadable {
        path: folder.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// True when `file_name` contains any non-empty keyword, ignoring case.
pub fn matches_keywords(file_name: &str, keywords: &[String]) -> bool {
    let file_name = file_name.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .any(|keyword| file_name.contains(&keyword.to_lowercase()))
}

/// List the regular files in `folder` whose names match `keywords`.
///
/// Results are in directory-listing order. Entries that disappear or cannot
/// be inspected while listing are skipped, as are subdirectories. Names that
/// are not valid UTF-8 are matched on their lossy conversion.
///
/// # Errors
///
/// Returns an error if the folder itself cannot be listed.
pub fn scan(folder: &Path, keywords: &[String]) -> Result<Vec<CandidateFile>, FolderError> {
    let entries = fs::read_dir(folder).map_err(|source| FolderError::Unreadable {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry in {}: {}", folder.display(), e);
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();

        if !matches_keywords(&name, keywords) {
            continue;
        }

        let path = entry.path();
        // follows symlinks, so a link to a file is printable
        if !fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
            debug!("Skipping {}: not a regular file", path.display());
            continue;
        }

        candidates.push(CandidateFile { name, path });
    }

    Ok(candidates)
}
