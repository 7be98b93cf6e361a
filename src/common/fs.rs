use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Create `path` and its parents when missing. A file already at `path` is an error.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("[common::fs] path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("[common::fs] failed to create directory {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_directories_and_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("out/svg");
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
        // idempotent
        ensure_dir_exists(&nested).unwrap();

        let file = tmp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = ensure_dir_exists(&file).unwrap_err();
        assert!(err.to_string().starts_with("[common::fs]"));
    }
}
