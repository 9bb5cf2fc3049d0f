//! # Novel Gen
//!
//! Publishes novel chapters stored in MySQL as a static HTML site. Every
//! chapter is written twice: once as plain HTML and once styled with Bulma.
//! Both come from pre-rendered fragments kept in the database.
//!
//! # Architecture: Linear Pipeline
//!
//! ```text
//! 1. Fetch      MySQL            →  Vec<Chapter>   (one flat join, pre-sorted)
//! 2. Organize   Vec<Chapter>     →  Vec<Novel>     (group, slug, filenames, links)
//! 3. Generate   Vec<Novel>       →  site/          (index + two pages per chapter)
//! ```
//!
//! Static assets are copied into the output root before any page is written.
//! Every run regenerates all pages from scratch. Nothing is cached, and
//! nothing is removed from the output directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | [`ChapterSource`](source::ChapterSource) trait and the MySQL implementation |
//! | [`organize`] | Groups rows into novels, assigns filenames and prev/next links |
//! | [`slug`] | Display name → URL-safe directory name |
//! | [`generate`] | Renders index and chapter pages with Maud and writes them |
//! | [`assets`] | Mirrors the static asset tree into the output root |
//! | [`config`] | Flag / environment configuration and validation |
//! | [`types`] | `Chapter` and `Novel` |
//! | [`output`] | End-of-run summary printed to stdout |
//!
//! # Design Decisions
//!
//! ## Index-Based Navigation
//!
//! A chapter's previous and next siblings are stored as indices into its
//! novel's chapter vector rather than as references. The novel owns its
//! chapters outright, and navigation is a lookup.
//!
//! ## Trusted Content
//!
//! Chapter bodies are HTML produced by an upstream converter and are embedded
//! with `PreEscaped`. Everything else (novel names, titles) goes through
//! Maud's escaping.
//!
//! ## Per-Page Failures Are Not Fatal
//!
//! A chapter page that cannot be written is logged and skipped, and the run
//! still succeeds. The shared prerequisites are fatal instead: the output
//! root, static assets, novel directories, and the index page. Without them
//! the whole site is broken.

pub mod assets;
pub mod config;
pub mod generate;
pub mod organize;
pub mod output;
pub mod slug;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
