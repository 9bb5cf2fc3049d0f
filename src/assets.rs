//! Static asset copying.
//!
//! Mirrors the static source tree (stylesheets, fonts, images) into the output
//! root. Directories are recreated. Files are copied byte for byte, and on
//! platforms that have them, permission bits come along. Existing files in the
//! output are overwritten, and nothing is ever deleted.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("error walking static assets: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("could not copy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> AssetError + '_ {
    move |source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Copy everything under `src` into `dst`. Returns the number of files copied.
pub fn copy_static_assets(src: &Path, dst: &Path) -> Result<usize, AssetError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let dest = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(io_err(&dest))?;
            // The output root keeps its own permissions.
            if entry.depth() > 0 {
                let permissions = entry.metadata()?.permissions();
                fs::set_permissions(&dest, permissions).map_err(io_err(&dest))?;
            }
            continue;
        }

        debug!("Copying {} to {}", entry.path().display(), dest.display());
        // fs::copy carries the source's permission bits.
        fs::copy(entry.path(), &dest).map_err(io_err(entry.path()))?;
        copied += 1;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::list_files;
    use tempfile::TempDir;

    fn static_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("style.css"), "body { margin: 0 }").unwrap();
        fs::create_dir_all(tmp.path().join("fonts/serif")).unwrap();
        fs::write(tmp.path().join("fonts/serif/book.woff2"), [0u8, 1, 2, 255]).unwrap();
        fs::create_dir_all(tmp.path().join("empty")).unwrap();
        tmp
    }

    #[test]
    fn copies_nested_files() {
        let src = static_tree();
        let out = TempDir::new().unwrap();

        let copied = copy_static_assets(src.path(), out.path()).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            list_files(out.path()),
            vec!["fonts/serif/book.woff2", "style.css"]
        );
        assert_eq!(
            fs::read(out.path().join("fonts/serif/book.woff2")).unwrap(),
            vec![0u8, 1, 2, 255]
        );
    }

    #[test]
    fn recreates_empty_directories() {
        let src = static_tree();
        let out = TempDir::new().unwrap();
        copy_static_assets(src.path(), out.path()).unwrap();
        assert!(out.path().join("empty").is_dir());
    }

    #[test]
    fn overwrites_existing_files_and_keeps_others() {
        let src = static_tree();
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("style.css"), "stale").unwrap();
        fs::write(out.path().join("orphan.html"), "old").unwrap();

        copy_static_assets(src.path(), out.path()).unwrap();

        assert_eq!(
            fs::read_to_string(out.path().join("style.css")).unwrap(),
            "body { margin: 0 }"
        );
        assert!(out.path().join("orphan.html").exists());
    }

    #[test]
    fn missing_source_is_error() {
        let out = TempDir::new().unwrap();
        let result = copy_static_assets(&out.path().join("nope"), out.path());
        assert!(matches!(result, Err(AssetError::Walk(_))));
    }

    #[cfg(unix)]
    #[test]
    fn preserves_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let src = static_tree();
        let script = src.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o750)).unwrap();
        let out = TempDir::new().unwrap();

        copy_static_assets(src.path(), out.path()).unwrap();

        let mode = fs::metadata(out.path().join("run.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o750);
    }
}
