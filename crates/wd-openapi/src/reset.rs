use std::path::{Path, PathBuf};

use crate::MergeError;

/// Delete every generated `*.api.mdx` page under `docs_dir`.
///
/// Returns the deleted paths. A missing `docs_dir` deletes nothing.
pub fn reset_generated_pages(docs_dir: &Path) -> Result<Vec<PathBuf>, MergeError> {
    if !docs_dir.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = format!(
        "{}/**/*.api.mdx",
        glob::Pattern::escape(&docs_dir.to_string_lossy())
    );
    let mut deleted = Vec::new();
    for path in glob::glob(&pattern)?.filter_map(Result::ok) {
        if !path.is_file() {
            continue;
        }
        std::fs::remove_file(&path).map_err(|source| MergeError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Deleted generated page");
        deleted.push(path);
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_reset_deletes_only_api_pages() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reference/items");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("create.api.mdx"), "generated").unwrap();
        fs::write(dir.path().join("list.api.mdx"), "generated").unwrap();
        fs::write(nested.join("guide.mdx"), "kept").unwrap();
        fs::write(nested.join("api.mdx"), "kept").unwrap();

        let deleted = reset_generated_pages(dir.path()).unwrap();

        assert_eq!(deleted.len(), 2);
        assert!(!nested.join("create.api.mdx").exists());
        assert!(!dir.path().join("list.api.mdx").exists());
        assert!(nested.join("guide.mdx").exists());
        assert!(nested.join("api.mdx").exists());
    }

    #[test]
    fn test_reset_missing_dir() {
        let deleted = reset_generated_pages(Path::new("/nonexistent/docs")).unwrap();
        assert!(deleted.is_empty());
    }
}
