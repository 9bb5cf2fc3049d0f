//! Shared types used across the pipeline.
//!
//! A [`Chapter`] comes out of the chapter source with only its stored fields
//! filled in. The organizer then groups chapters into [`Novel`]s and fills the
//! derived fields: slug, output filenames, and sibling links.

/// A single chapter as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Source row id. Opaque, only used in diagnostics.
    pub id: i64,
    pub novel_name: String,
    pub volume_number: u32,
    pub chapter_number: u32,
    /// Pre-rendered plain HTML fragment. Trusted, embedded unescaped.
    pub content_html: String,
    /// Pre-rendered Bulma-styled HTML fragment. Trusted, embedded unescaped.
    pub content_bulma: String,

    // Derived by the organizer.
    pub novel_slug: String,
    pub filename_plain: String,
    pub filename_styled: String,
    /// Index of the previous chapter in the owning novel's `chapters`.
    pub prev: Option<usize>,
    /// Index of the next chapter in the owning novel's `chapters`.
    pub next: Option<usize>,
}

impl Chapter {
    /// Build a chapter from its stored fields. Derived fields start empty.
    pub fn new(
        id: i64,
        novel_name: impl Into<String>,
        volume_number: u32,
        chapter_number: u32,
        content_html: impl Into<String>,
        content_bulma: impl Into<String>,
    ) -> Self {
        Self {
            id,
            novel_name: novel_name.into(),
            volume_number,
            chapter_number,
            content_html: content_html.into(),
            content_bulma: content_bulma.into(),
            novel_slug: String::new(),
            filename_plain: String::new(),
            filename_styled: String::new(),
            prev: None,
            next: None,
        }
    }

    /// Output filename for the given variant.
    pub fn filename(&self, styled: bool) -> &str {
        if styled {
            &self.filename_styled
        } else {
            &self.filename_plain
        }
    }

    /// Content fragment for the given variant.
    pub fn content(&self, styled: bool) -> &str {
        if styled {
            &self.content_bulma
        } else {
            &self.content_html
        }
    }

    /// Human-readable position, e.g. "Volume 2, Chapter 14".
    pub fn label(&self) -> String {
        format!(
            "Volume {}, Chapter {}",
            self.volume_number, self.chapter_number
        )
    }
}

/// All chapters of one novel, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Novel {
    pub name: String,
    pub slug: String,
    pub chapters: Vec<Chapter>,
}

impl Novel {
    /// The chapter before `chapters[index]`, if any.
    pub fn prev_of(&self, index: usize) -> Option<&Chapter> {
        self.chapters
            .get(index)
            .and_then(|c| c.prev)
            .and_then(|i| self.chapters.get(i))
    }

    /// The chapter after `chapters[index]`, if any.
    pub fn next_of(&self, index: usize) -> Option<&Chapter> {
        self.chapters
            .get(index)
            .and_then(|c| c.next)
            .and_then(|i| self.chapters.get(i))
    }
}
