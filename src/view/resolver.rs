//! View resolution - picks a template file from a list of candidates

use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Answers whether a path is a readable regular file
pub trait FileProbe: Send + Sync {
    fn is_readable_file(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn is_readable_file(&self, path: &Path) -> bool {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => File::open(path).is_ok(),
            _ => false,
        }
    }
}

/// Resolve a candidate against the views base path.
///
/// Candidates starting with `/` are absolute and kept as-is. Without a base
/// path, relative candidates are kept relative to the working directory.
pub fn resolve_candidate(base: Option<&Path>, candidate: &str) -> PathBuf {
    match base {
        Some(base) if !candidate.starts_with('/') => base.join(candidate),
        _ => PathBuf::from(candidate),
    }
}

/// Find the view to render among `candidates`.
///
/// A single candidate is returned without checking it exists. With several,
/// the first one the probe reports readable wins.
pub fn find_view<S: AsRef<str>>(
    candidates: &[S],
    base: Option<&Path>,
    probe: &dyn FileProbe,
) -> Option<PathBuf> {
    match candidates {
        [] => None,
        [only] => Some(resolve_candidate(base, only.as_ref())),
        _ => candidates
            .iter()
            .map(|candidate| resolve_candidate(base, candidate.as_ref()))
            .find(|path| probe.is_readable_file(path)),
    }
}
