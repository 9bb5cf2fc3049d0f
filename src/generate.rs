//! HTML site generation.
//!
//! Takes the chapter rows, organizes them into novels and writes the final
//! static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): every novel with links to both variants
//!   of each chapter
//! - **Chapter pages** (`/{novel-slug}/v{V}-c{C}.html`): plain variant
//! - **Styled chapter pages** (`/{novel-slug}/v{V}-c{C}-styled.html`): Bulma
//!   variant
//!
//! ## Output Structure
//!
//! ```text
//! site/
//! ├── index.html
//! ├── style.css                  # Static assets (copied)
//! ├── the-long-road/
//! │   ├── v1-c1.html
//! │   ├── v1-c1-styled.html
//! │   ├── v1-c2.html
//! │   └── v1-c2-styled.html
//! └── ...
//! ```
//!
//! The output directory is never cleared. Pages for chapters that have since
//! been removed from the database stay where they are.
//!
//! ## Failure Handling
//!
//! Failing to prepare the output root, copy assets, create a novel directory
//! or write the index aborts the run. A chapter page that fails to write is
//! logged and skipped. The plain and styled variants are written
//! independently.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating. All
//! pages share [`layout`]. Chapter content is pre-rendered HTML from the
//! database and is embedded unescaped.

use crate::assets::{self, AssetError};
use crate::organize::organize;
use crate::source::{ChapterSource, SourceError};
use crate::types::{Chapter, Novel};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("could not prepare output directory {path}: {source}")]
    PrepareOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to copy static assets: {0}")]
    Assets(#[from] AssetError),
    #[error("could not create directory for novel '{novel}': {source}")]
    NovelDir {
        novel: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub const INDEX_FILE: &str = "index.html";

/// Relative path from a chapter page back to the site root.
pub const CHAPTER_BASE_PATH: &str = "../";

const BULMA_CSS: &str = "https://cdn.jsdelivr.net/npm/bulma@1.0.2/css/bulma.min.css";

/// Pages shorter than this almost certainly lost their layout.
const SHORT_PAGE_BYTES: usize = 150;

// ============================================================================
// Page envelopes
// ============================================================================

/// Data for the index page.
pub struct IndexPage<'a> {
    pub novels: &'a [Novel],
    pub styled: bool,
    pub base_path: &'a str,
}

impl<'a> IndexPage<'a> {
    pub fn new(novels: &'a [Novel]) -> Self {
        Self {
            novels,
            styled: false,
            base_path: "",
        }
    }
}

/// Data for a single chapter page in one variant.
pub struct ChapterPage<'a> {
    pub novel: &'a Novel,
    pub chapter: &'a Chapter,
    pub prev: Option<&'a Chapter>,
    pub next: Option<&'a Chapter>,
    pub styled: bool,
    pub base_path: &'a str,
}

impl<'a> ChapterPage<'a> {
    /// Envelope for `novel.chapters[index]`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn new(novel: &'a Novel, index: usize, styled: bool) -> Self {
        Self {
            novel,
            chapter: &novel.chapters[index],
            prev: novel.prev_of(index),
            next: novel.next_of(index),
            styled,
            base_path: CHAPTER_BASE_PATH,
        }
    }
}

// ============================================================================
// Run report
// ============================================================================

/// What a generation run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub assets_copied: usize,
    pub novels: Vec<NovelReport>,
}

/// Pages written for one novel, relative to its directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NovelReport {
    pub name: String,
    pub slug: String,
    pub chapters: usize,
    pub written: Vec<String>,
    pub failed: Vec<String>,
}

impl GenerateReport {
    pub fn pages_written(&self) -> usize {
        self.novels.iter().map(|n| n.written.len()).sum()
    }

    pub fn pages_failed(&self) -> usize {
        self.novels.iter().map(|n| n.failed.len()).sum()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Fetch every chapter from `source` and generate the site.
///
/// Returns `Ok(None)` when the source has no chapters. Nothing is created or
/// copied in that case, not even the output root.
pub fn generate_from_source(
    source: &mut impl ChapterSource,
    output_dir: &Path,
    static_dir: &Path,
) -> Result<Option<GenerateReport>, GenerateError> {
    let chapters = source.fetch_chapters()?;
    if chapters.is_empty() {
        info!("No chapters fetched from the database. Exiting.");
        return Ok(None);
    }
    info!("Fetched {} chapters", chapters.len());
    generate(chapters, output_dir, static_dir).map(Some)
}

/// Generate the whole site from `chapters` into `output_dir`.
///
/// `static_dir` is mirrored into the output root first. If `chapters` is
/// empty, the output root and assets are still prepared but no pages are
/// written.
pub fn generate(
    chapters: Vec<Chapter>,
    output_dir: &Path,
    static_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    info!("Starting static site generation");
    prepare_output_dir(output_dir)?;

    info!("Copying static assets from {}", static_dir.display());
    let assets_copied = assets::copy_static_assets(static_dir, output_dir)?;

    let mut report = GenerateReport {
        output_dir: output_dir.to_path_buf(),
        assets_copied,
        novels: Vec::new(),
    };

    let novels = organize(chapters);
    if novels.is_empty() {
        info!("No novels found to generate");
        return Ok(report);
    }

    write_index(&novels, output_dir)?;

    for (i, novel) in novels.iter().enumerate() {
        info!(
            "Processing novel {}/{}: {} ({})",
            i + 1,
            novels.len(),
            novel.name,
            novel.slug
        );
        report.novels.push(write_novel(novel, output_dir)?);
    }

    info!(
        "Static site generation completed: {} pages written, {} failed",
        report.pages_written(),
        report.pages_failed()
    );
    Ok(report)
}

fn prepare_output_dir(output_dir: &Path) -> Result<(), GenerateError> {
    if output_dir.is_dir() {
        info!(
            "Output directory {} exists; files from earlier runs are kept",
            output_dir.display()
        );
    }
    fs::create_dir_all(output_dir).map_err(|source| GenerateError::PrepareOutput {
        path: output_dir.to_path_buf(),
        source,
    })?;
    debug!("Output directory {} prepared", output_dir.display());
    Ok(())
}

fn write_index(novels: &[Novel], output_dir: &Path) -> Result<(), GenerateError> {
    let path = output_dir.join(INDEX_FILE);
    info!("Generating index page: {}", path.display());
    write_page(&path, render_index(&IndexPage::new(novels)))
}

fn write_novel(novel: &Novel, output_dir: &Path) -> Result<NovelReport, GenerateError> {
    let novel_dir = output_dir.join(&novel.slug);
    fs::create_dir_all(&novel_dir).map_err(|source| GenerateError::NovelDir {
        novel: novel.name.clone(),
        source,
    })?;

    // Each (chapter, variant) pair is independent; the directory above must
    // exist before any of them run.
    let units: Vec<(usize, bool)> = (0..novel.chapters.len())
        .flat_map(|i| [(i, false), (i, true)])
        .collect();

    let results: Vec<(String, Result<(), GenerateError>)> = units
        .par_iter()
        .map(|&(index, styled)| {
            let page = ChapterPage::new(novel, index, styled);
            let filename = page.chapter.filename(styled).to_string();
            let result = write_page(&novel_dir.join(&filename), render_chapter(&page));
            (filename, result)
        })
        .collect();

    let mut report = NovelReport {
        name: novel.name.clone(),
        slug: novel.slug.clone(),
        chapters: novel.chapters.len(),
        ..Default::default()
    };
    for (filename, result) in results {
        match result {
            Ok(()) => report.written.push(filename),
            Err(e) => {
                error!("Skipping {}/{}: {e}", novel.slug, filename);
                report.failed.push(filename);
            }
        }
    }

    info!(
        "Finished novel {}: {} pages written",
        novel.name,
        report.written.len()
    );
    Ok(report)
}

fn write_page(path: &Path, page: Markup) -> Result<(), GenerateError> {
    let html = page.into_string();
    if html.len() < SHORT_PAGE_BYTES {
        warn!(
            "Generated page {} is only {} bytes; layout likely missing",
            path.display(),
            html.len()
        );
    }
    fs::write(path, html).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {}", path.display());
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Shared base layout for every page.
pub fn layout(title: &str, base_path: &str, styled: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if styled {
                    link rel="stylesheet" href=(BULMA_CSS);
                }
                link rel="stylesheet" href={ (base_path) "style.css" };
            }
            body class=[styled.then_some("styled")] {
                header.site-header {
                    a.home-link href={ (base_path) (INDEX_FILE) } { "All novels" }
                }
                (content)
            }
        }
    }
}

/// Previous / index / next links, staying within the page's variant.
fn chapter_nav(page: &ChapterPage) -> Markup {
    html! {
        nav.chapter-nav {
            @if let Some(prev) = page.prev {
                a.prev rel="prev" href=(prev.filename(page.styled)) { "← " (prev.label()) }
            }
            a.index href={ (page.base_path) (INDEX_FILE) "#" (page.novel.slug) } { "Contents" }
            @if let Some(next) = page.next {
                a.next rel="next" href=(next.filename(page.styled)) { (next.label()) " →" }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page listing every novel and its chapters.
pub fn render_index(page: &IndexPage) -> Markup {
    let content = html! {
        main.index-page.section[page.styled] {
            h1 { "Novels" }
            @for novel in page.novels {
                section.novel id=(novel.slug) {
                    h2 { (novel.name) }
                    ol.chapter-list {
                        @for chapter in &novel.chapters {
                            li {
                                a href={ (page.base_path) (novel.slug) "/" (chapter.filename_plain) } {
                                    (chapter.label())
                                }
                                " "
                                a.styled-link href={ (page.base_path) (novel.slug) "/" (chapter.filename_styled) } {
                                    "(styled)"
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    layout("Novels", page.base_path, page.styled, content)
}

/// Renders a chapter page in the envelope's variant.
pub fn render_chapter(page: &ChapterPage) -> Markup {
    let chapter = page.chapter;
    let title = format!("{} - {}", page.novel.name, chapter.label());
    let nav = chapter_nav(page);

    let content = html! {
        main.chapter-page.section[page.styled] {
            header.chapter-header {
                p.novel-title { (page.novel.name) }
                h1 { (chapter.label()) }
                p.variant-switch {
                    a href=(chapter.filename(!page.styled)) {
                        @if page.styled { "Plain version" } @else { "Styled version" }
                    }
                }
            }
            (nav)
            article.chapter-content.content[page.styled] {
                (PreEscaped(chapter.content(page.styled)))
            }
            (nav)
        }
    };

    layout(&title, page.base_path, page.styled, content)
}

// ============================================================================
// Tests
// ============================================================================
