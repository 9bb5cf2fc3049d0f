//! CLI output formatting for a generation run.
//!
//! The log stream (via `tracing`) narrates the run as it happens. This module
//! prints the end-of-run summary: what ended up where.
//!
//! # Output Format
//!
//! ```text
//! Home → index.html
//! 001 Alpha → alpha/ (1 chapter)
//! 002 The Long Road → the-long-road/ (12 chapters)
//!     Failed: v1-c3-styled.html
//!
//! Generated 2 novels, 25 pages, 1 failed, 1 asset → site
//! ```
//!
//! [`format_generate_output`] is pure and returns lines, for testability.
//! [`print_generate_output`] writes them to stdout.

use crate::generate::{GenerateReport, INDEX_FILE};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format the summary of a generation run.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    if report.novels.is_empty() {
        lines.push("No novels generated".to_string());
        return lines;
    }

    lines.push(format!("Home → {INDEX_FILE}"));
    for (i, novel) in report.novels.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}/ ({})",
            format_index(i + 1),
            novel.name,
            novel.slug,
            plural(novel.chapters, "chapter")
        ));
        for failed in &novel.failed {
            lines.push(format!("{}Failed: {}", indent(1), failed));
        }
    }

    lines.push(String::new());
    let failed = report.pages_failed();
    let failed_note = if failed > 0 {
        format!(", {failed} failed")
    } else {
        String::new()
    };
    lines.push(format!(
        "Generated {}, {}{}, {} → {}",
        plural(report.novels.len(), "novel"),
        plural(report.pages_written(), "page"),
        failed_note,
        plural(report.assets_copied, "asset"),
        report.output_dir.display()
    ));
    lines
}

/// Print the run summary to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::NovelReport;
    use std::path::PathBuf;

    fn novel(name: &str, slug: &str, chapters: usize, failed: &[&str]) -> NovelReport {
        NovelReport {
            name: name.to_string(),
            slug: slug.to_string(),
            chapters,
            written: (0..chapters * 2 - failed.len())
                .map(|i| format!("page-{i}.html"))
                .collect(),
            failed: failed.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn report(novels: Vec<NovelReport>) -> GenerateReport {
        GenerateReport {
            output_dir: PathBuf::from("site"),
            assets_copied: 1,
            novels,
        }
    }

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn indent_four_spaces_per_level() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "chapter"), "1 chapter");
        assert_eq!(plural(0, "page"), "0 pages");
        assert_eq!(plural(3, "novel"), "3 novels");
    }

    #[test]
    fn empty_report() {
        assert_eq!(
            format_generate_output(&report(vec![])),
            vec!["No novels generated"]
        );
    }

    #[test]
    fn lists_novels_with_slugs() {
        let lines = format_generate_output(&report(vec![
            novel("Alpha", "alpha", 1, &[]),
            novel("beta", "beta", 2, &[]),
        ]));
        assert_eq!(
            lines,
            vec![
                "Home → index.html",
                "001 Alpha → alpha/ (1 chapter)",
                "002 beta → beta/ (2 chapters)",
                "",
                "Generated 2 novels, 6 pages, 1 asset → site",
            ]
        );
    }

    #[test]
    fn summary_counts_copied_assets() {
        let mut r = report(vec![novel("Alpha", "alpha", 1, &[])]);
        r.assets_copied = 4;
        let lines = format_generate_output(&r);
        assert_eq!(
            lines.last().unwrap(),
            "Generated 1 novel, 2 pages, 4 assets → site"
        );
    }

    #[test]
    fn failed_pages_listed_under_novel() {
        let lines = format_generate_output(&report(vec![novel(
            "beta",
            "beta",
            2,
            &["v1-c1.html"],
        )]));
        assert_eq!(lines[2], "    Failed: v1-c1.html");
        assert_eq!(lines[4], "Generated 1 novel, 3 pages, 1 failed, 1 asset → site");
    }
}
