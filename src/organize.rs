//! Groups flat chapter rows into novels and wires up navigation.
//!
//! The source returns chapters already sorted by
//! `(novel_name, volume_number, chapter_number)`. Grouping keeps that order
//! inside each novel and does not re-sort. Novels themselves come out sorted
//! by name in byte order, which gives a deterministic index page.

use crate::slug::slugify;
use crate::types::{Chapter, Novel};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Plain-variant output filename for a chapter.
pub fn plain_filename(volume: u32, chapter: u32) -> String {
    format!("v{volume}-c{chapter}.html")
}

/// Styled-variant output filename for a chapter.
pub fn styled_filename(volume: u32, chapter: u32) -> String {
    format!("v{volume}-c{chapter}-styled.html")
}

/// Group chapters by exact novel name and fill in each chapter's derived
/// fields.
pub fn organize(chapters: Vec<Chapter>) -> Vec<Novel> {
    let mut by_novel: BTreeMap<String, Vec<Chapter>> = BTreeMap::new();
    for chapter in chapters {
        by_novel
            .entry(chapter.novel_name.clone())
            .or_default()
            .push(chapter);
    }

    let novels: Vec<Novel> = by_novel
        .into_iter()
        .map(|(name, chapters)| build_novel(name, chapters))
        .collect();

    warn_on_slug_collisions(&novels);
    novels
}

fn build_novel(name: String, mut chapters: Vec<Chapter>) -> Novel {
    let slug = slugify(&name);
    let last = chapters.len().saturating_sub(1);

    for (i, chapter) in chapters.iter_mut().enumerate() {
        chapter.novel_slug = slug.clone();
        chapter.filename_plain = plain_filename(chapter.volume_number, chapter.chapter_number);
        chapter.filename_styled = styled_filename(chapter.volume_number, chapter.chapter_number);
        chapter.prev = (i > 0).then(|| i - 1);
        chapter.next = (i < last).then(|| i + 1);
    }

    debug!(novel = %name, %slug, chapters = chapters.len(), "organized novel");
    Novel {
        name,
        slug,
        chapters,
    }
}

fn warn_on_slug_collisions(novels: &[Novel]) {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for novel in novels {
        match seen.get(novel.slug.as_str()).copied() {
            Some(first) => warn!(
                slug = %novel.slug,
                "novels '{first}' and '{}' share a slug; their pages will be written to the same directory and the index anchor will point at '{first}'",
                novel.name
            ),
            None => {
                seen.insert(&novel.slug, &novel.name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{chapter, chapter_ids, novel_names};

    #[test]
    fn empty_input_gives_no_novels() {
        assert!(organize(vec![]).is_empty());
    }

    #[test]
    fn novels_sorted_by_name_in_byte_order() {
        let novels = organize(vec![
            chapter(1, "beta", 1, 1),
            chapter(2, "Alpha", 1, 1),
            chapter(3, "alpha", 1, 1),
        ]);
        // Uppercase sorts before lowercase.
        assert_eq!(novel_names(&novels), vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn grouping_is_case_sensitive() {
        let novels = organize(vec![chapter(1, "Alpha", 1, 1), chapter(2, "alpha", 1, 1)]);
        assert_eq!(novels.len(), 2);
    }

    #[test]
    fn every_chapter_appears_exactly_once() {
        let input = vec![
            chapter(10, "B", 1, 1),
            chapter(11, "A", 1, 1),
            chapter(12, "B", 1, 2),
            chapter(13, "C", 2, 1),
            chapter(14, "A", 1, 2),
            chapter(15, "B", 2, 1),
        ];
        let novels = organize(input);
        let mut ids: Vec<i64> = novels.iter().flat_map(chapter_ids).collect();
        ids.sort();
        assert_eq!(ids, vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn incoming_order_preserved_within_novel() {
        // Deliberately out of (volume, chapter) order; the organizer trusts
        // the source and keeps it as is.
        let novels = organize(vec![
            chapter(1, "N", 1, 2),
            chapter(2, "N", 1, 1),
            chapter(3, "N", 2, 1),
        ]);
        assert_eq!(chapter_ids(&novels[0]), vec![1, 2, 3]);
    }

    #[test]
    fn slug_assigned_to_novel_and_chapters() {
        let novels = organize(vec![chapter(1, "The Long Road", 1, 1)]);
        assert_eq!(novels[0].slug, "the-long-road");
        assert_eq!(novels[0].chapters[0].novel_slug, "the-long-road");
    }

    #[test]
    fn filenames_derived_from_volume_and_chapter() {
        let novels = organize(vec![chapter(1, "N", 3, 17)]);
        let ch = &novels[0].chapters[0];
        assert_eq!(ch.filename_plain, "v3-c17.html");
        assert_eq!(ch.filename_styled, "v3-c17-styled.html");
    }

    #[test]
    fn single_chapter_has_no_links() {
        let novels = organize(vec![chapter(1, "Solo", 1, 1)]);
        let ch = &novels[0].chapters[0];
        assert_eq!(ch.prev, None);
        assert_eq!(ch.next, None);
    }

    #[test]
    fn links_point_at_neighbours() {
        let novels = organize((1..=5).map(|n| chapter(n, "N", 1, n as u32)).collect());
        let chapters = &novels[0].chapters;
        let n = chapters.len() - 1;

        assert_eq!(chapters[0].prev, None);
        assert_eq!(chapters[n].next, None);
        for i in 1..n {
            assert_eq!(chapters[i].prev, Some(i - 1));
            assert_eq!(chapters[i].next, Some(i + 1));
        }
        assert_eq!(chapters[0].next, Some(1));
        assert_eq!(chapters[n].prev, Some(n - 1));
    }

    #[test]
    fn links_do_not_cross_novels() {
        let novels = organize(vec![chapter(1, "A", 1, 1), chapter(2, "B", 1, 1)]);
        for novel in &novels {
            assert_eq!(novel.chapters[0].prev, None);
            assert_eq!(novel.chapters[0].next, None);
        }
    }

    #[test]
    fn colliding_slugs_keep_both_novels() {
        let novels = organize(vec![chapter(1, "Café", 1, 1), chapter(2, "cafe", 1, 1)]);
        assert_eq!(novels.len(), 2);
        assert_eq!(novels[0].slug, novels[1].slug);
    }
}
