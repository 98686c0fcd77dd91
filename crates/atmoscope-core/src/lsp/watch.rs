//! Watched-files forwarding
//!
//! The server keeps its package model fresh through the standard
//! `workspace/didChangeWatchedFiles` mechanism, scoped to `**/*.at`.
//! Folder renames and deletes carry no file extension and would otherwise
//! never reach it, so those are translated manually into change events
//! for the folder path itself.

use std::path::{Path, PathBuf};

use async_lsp::lsp_types::{FileChangeType, FileEvent, Url};

use crate::is_src_file;

/// A filesystem change observed by the host editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsChange {
    Created(PathBuf),
    Changed(PathBuf),
    Renamed { from: PathBuf, to: PathBuf },
    Deleted(PathBuf),
}

/// Directories are distinguished from files by the absence of an
/// extension; the path may no longer exist (rename/delete), so the
/// filesystem cannot be asked.
#[must_use]
pub fn looks_like_dir(path: &Path) -> bool {
    path.extension().is_none()
}

/// Translate one filesystem change into the events to forward.
///
/// Source files get the standard treatment; renames expand into a delete
/// of the old path plus a create of the new one. Directory paths are only
/// reported for renames and deletes (the manual fallback); a created
/// directory becomes visible through the files later created inside it.
/// Everything else is not the server's concern and yields no events.
#[must_use]
pub fn watched_events(change: &FsChange) -> Vec<FileEvent> {
    match change {
        FsChange::Created(path) if is_src_file(path) => {
            file_events(&[(path, FileChangeType::CREATED)])
        }
        FsChange::Changed(path) if is_src_file(path) => {
            file_events(&[(path, FileChangeType::CHANGED)])
        }
        FsChange::Deleted(path) if is_src_file(path) || looks_like_dir(path) => {
            file_events(&[(path, FileChangeType::DELETED)])
        }
        FsChange::Renamed { from, to }
            if is_src_file(from) || is_src_file(to) || looks_like_dir(from) =>
        {
            file_events(&[(from, FileChangeType::DELETED), (to, FileChangeType::CREATED)])
        }
        _ => vec![],
    }
}

fn file_events(changes: &[(&PathBuf, FileChangeType)]) -> Vec<FileEvent> {
    changes
        .iter()
        .filter_map(|(path, typ)| match Url::from_file_path(path) {
            Ok(uri) => Some(FileEvent { uri, typ: *typ }),
            Err(()) => {
                tracing::warn!("not forwarding non-absolute path {}", path.display());
                None
            }
        })
        .collect()
}
