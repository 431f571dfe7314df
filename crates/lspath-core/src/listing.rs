use crate::path::expand_tilde;
use crate::{Error, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::Metadata;
use walkdir::WalkDir;

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirListing {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub mode: String,
    pub modified: Option<String>,
}

/// List the immediate children of `dir`, sorted by name.
pub fn list_directory(dir: &str) -> Result<Vec<DirListing>> {
    let root = expand_tilde(dir);
    if !root.is_dir() {
        return Err(Error::NotADirectory(dir.to_string()));
    }

    let mut rows = Vec::new();
    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        // Entries that vanish mid-listing are skipped
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        rows.push(DirListing {
            name: entry.file_name().to_string_lossy().to_string(),
            is_dir: meta.is_dir(),
            size: meta.len(),
            mode: mode_string(&meta),
            modified: meta
                .modified()
                .ok()
                .map(|t| DateTime::<Local>::from(t).format("%b %d %H:%M").to_string()),
        });
    }
    Ok(rows)
}

/// "N files, M dirs" for a PATH directory, or "unknown" if it cannot be read.
pub fn dir_stats(dir: &str) -> String {
    let root = expand_tilde(dir);
    if !root.is_dir() {
        return "unknown".to_string();
    }

    let (mut files, mut dirs) = (0usize, 0usize);
    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_dir() {
            dirs += 1;
        } else {
            files += 1;
        }
    }
    format!("{} files, {} dirs", files, dirs)
}

#[cfg(unix)]
fn mode_string(meta: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let bits = meta.permissions().mode();
    let kind = if meta.file_type().is_symlink() {
        'l'
    } else if meta.is_dir() {
        'd'
    } else {
        '-'
    };
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6u32, 3, 0] {
        let triad = (bits >> shift) & 0o7;
        out.push(if triad & 0o4 != 0 { 'r' } else { '-' });
        out.push(if triad & 0o2 != 0 { 'w' } else { '-' });
        out.push(if triad & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(not(unix))]
fn mode_string(meta: &Metadata) -> String {
    let kind = if meta.is_dir() { 'd' } else { '-' };
    let write = if meta.permissions().readonly() { '-' } else { 'w' };
    format!("{}r{}-", kind, write)
}
