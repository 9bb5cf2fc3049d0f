//! Shared test utilities for the novel-gen test suite.
//!
//! Builders for chapter rows and small extractors over organized novels,
//! plus a helper that lists every file under a generated site.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let novels = organize(vec![chapter(1, "Alpha", 1, 1)]);
//! assert_eq!(novel_names(&novels), vec!["Alpha"]);
//! ```

use std::path::Path;

use crate::types::{Chapter, Novel};

// =========================================================================
// Builders
// =========================================================================

/// A chapter whose content identifies it, e.g. `<p>Alpha v1c2</p>`.
pub fn chapter(id: i64, novel: &str, volume: u32, number: u32) -> Chapter {
    Chapter::new(
        id,
        novel,
        volume,
        number,
        format!("<p>{novel} v{volume}c{number}</p>"),
        format!("<div class=\"content\"><p>{novel} v{volume}c{number}</p></div>"),
    )
}

/// The two-novel fixture: "Alpha" with one chapter, "beta" with two.
pub fn alpha_beta() -> Vec<Chapter> {
    vec![
        chapter(1, "Alpha", 1, 1),
        chapter(2, "beta", 1, 1),
        chapter(3, "beta", 1, 2),
    ]
}

// =========================================================================
// Extractors
// =========================================================================

pub fn novel_names(novels: &[Novel]) -> Vec<&str> {
    novels.iter().map(|n| n.name.as_str()).collect()
}

pub fn chapter_ids(novel: &Novel) -> Vec<i64> {
    novel.chapters.iter().map(|c| c.id).collect()
}

/// All files under `root`, as sorted `/`-separated relative paths.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}
