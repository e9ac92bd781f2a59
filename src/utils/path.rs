//! Collision-free output path allocation

use std::path::{Path, PathBuf};

use crate::error::BatchCutResult;

/// Return `candidate` unchanged when nothing exists at that path, otherwise
/// the first `stem(n).ext` variant (n = 1, 2, 3, ...) that does not exist.
///
/// This is a pure check: the returned path is not created, so a file can
/// still appear between allocation and the actual write. The batch semantics
/// accept that window.
pub fn allocate_unique(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }

    let parent = candidate.parent().unwrap_or_else(|| Path::new(""));
    let stem = candidate
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = candidate
        .extension()
        .map(|e| e.to_string_lossy().to_string());

    let mut counter = 1u32;
    loop {
        let file_name = match &extension {
            Some(ext) => format!("{}({}).{}", stem, counter, ext),
            None => format!("{}({})", stem, counter),
        };
        let next = parent.join(file_name);
        if !next.exists() {
            return next;
        }
        counter += 1;
    }
}

/// Create `dir` and any missing parents
pub fn ensure_dir(dir: &Path) -> BatchCutResult<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}
