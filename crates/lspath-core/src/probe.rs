use crate::path::{clean_path, expand_tilde};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What `stat` said about a PATH directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum Existence {
    Present,
    Missing,
    NotADirectory,
    /// The probe itself failed (permissions, I/O)
    Unknown(String),
}

/// Filesystem facts about one PATH directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirProbe {
    /// The value with `~` expanded
    pub normalized: PathBuf,

    /// Target after exactly one level of symlink resolution
    pub symlink_target: Option<PathBuf>,

    pub existence: Existence,
}

impl DirProbe {
    /// Path used for "same directory reached two ways" comparisons.
    pub fn resolved(&self) -> &Path {
        self.symlink_target.as_deref().unwrap_or(&self.normalized)
    }

    pub fn is_symlink(&self) -> bool {
        self.symlink_target.is_some()
    }

    pub fn is_missing(&self) -> bool {
        self.existence == Existence::Missing
    }

    /// Diagnostic line for the entry, if anything is wrong with it.
    pub fn diagnostic(&self) -> Option<String> {
        match &self.existence {
            Existence::Present => None,
            Existence::Missing => Some("Directory does not exist on disk.".to_string()),
            Existence::NotADirectory => Some("Path exists but is not a directory.".to_string()),
            Existence::Unknown(err) => Some(format!("Could not inspect directory: {}", err)),
        }
    }
}

/// Probe a PATH value without following the final symlink, then stat it.
pub fn probe_dir(value: &str) -> DirProbe {
    let normalized = expand_tilde(value);
    let symlink_target = read_link_once(&normalized);

    let existence = match fs::metadata(&normalized) {
        Ok(meta) if meta.is_dir() => Existence::Present,
        Ok(_) => Existence::NotADirectory,
        Err(err) if err.kind() == ErrorKind::NotFound => Existence::Missing,
        Err(err) => Existence::Unknown(err.to_string()),
    };

    DirProbe {
        normalized,
        symlink_target,
        existence,
    }
}

fn read_link_once(path: &Path) -> Option<PathBuf> {
    let meta = fs::symlink_metadata(path).ok()?;
    if !meta.file_type().is_symlink() {
        return None;
    }

    let target = fs::read_link(path).ok()?;
    let absolute = if target.is_absolute() {
        target
    } else {
        path.parent().unwrap_or_else(|| Path::new("/")).join(target)
    };
    Some(clean_path(&absolute))
}
