//! Chapter source: where chapter rows come from.
//!
//! [`ChapterSource`] is the seam between the generator and storage. The
//! production implementation, [`MySqlChapterSource`], runs a single join over
//! `chapters`, `novels` and `volumes`. `Vec<Chapter>` also implements the trait
//! so the rest of the pipeline can be driven from memory.
//!
//! Rows come back sorted by `(novel_name, volume_number, chapter_number)`. The
//! organizer relies on that order, so any other source must keep it.
//!
//! A row that fails to decode is logged and skipped. A failed connection or
//! query is returned as an error.

use crate::types::Chapter;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Connection, FromRow, Row};
use thiserror::Error;
use tokio::runtime::Runtime;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to start database runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("failed to execute chapter query: {0}")]
    Query(#[source] sqlx::Error),
    #[error("failed to decode chapter row{}: {reason}", .id.map(|i| format!(" {i}")).unwrap_or_default())]
    Decode { id: Option<i64>, reason: String },
}

/// Anything that can hand the generator its chapters.
pub trait ChapterSource {
    /// Fetch every chapter, ordered by novel name, volume, then chapter.
    fn fetch_chapters(&mut self) -> Result<Vec<Chapter>, SourceError>;
}

impl ChapterSource for Vec<Chapter> {
    fn fetch_chapters(&mut self) -> Result<Vec<Chapter>, SourceError> {
        Ok(self.clone())
    }
}

/// Ids and numbers are cast to BIGINT so they decode as `i64` whatever the
/// column width.
pub const CHAPTERS_QUERY: &str = r#"
    SELECT CAST(c.chapter_id AS SIGNED) AS chapter_id,
           n.name AS novel_name,
           CAST(v.volume_number AS SIGNED) AS volume_number,
           CAST(c.chapter_number AS SIGNED) AS chapter_number,
           c.content_html,
           c.content_bulma
    FROM chapters c
    INNER JOIN novels n ON n.novel_id = c.novel_id
    INNER JOIN volumes v ON v.volume_id = c.volume_id
    ORDER BY novel_name, v.volume_number, c.chapter_number
"#;

#[derive(Debug, FromRow)]
struct ChapterRow {
    chapter_id: i64,
    novel_name: String,
    volume_number: i64,
    chapter_number: i64,
    content_html: String,
    content_bulma: String,
}

fn position(value: i64, field: &str, id: i64) -> Result<u32, SourceError> {
    u32::try_from(value)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| SourceError::Decode {
            id: Some(id),
            reason: format!("{field} must be a positive integer, got {value}"),
        })
}

impl TryFrom<ChapterRow> for Chapter {
    type Error = SourceError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        let volume = position(row.volume_number, "volume_number", row.chapter_id)?;
        let number = position(row.chapter_number, "chapter_number", row.chapter_id)?;
        Ok(Chapter::new(
            row.chapter_id,
            row.novel_name,
            volume,
            number,
            row.content_html,
            row.content_bulma,
        ))
    }
}

fn decode_row(row: &MySqlRow) -> Result<Chapter, SourceError> {
    let decoded = ChapterRow::from_row(row).map_err(|e| SourceError::Decode {
        id: row.try_get::<i64, _>("chapter_id").ok(),
        reason: e.to_string(),
    })?;
    Chapter::try_from(decoded)
}

/// Keep the rows that decoded, logging and dropping the rest.
pub fn collect_decoded(
    rows: impl IntoIterator<Item = Result<Chapter, SourceError>>,
) -> Vec<Chapter> {
    rows.into_iter()
        .filter_map(|row| match row {
            Ok(chapter) => Some(chapter),
            Err(e) => {
                warn!("skipping chapter row: {e}");
                None
            }
        })
        .collect()
}

/// MySQL-backed chapter source.
///
/// Owns a current-thread tokio runtime so the rest of the generator can stay
/// synchronous.
pub struct MySqlChapterSource {
    conn: MySqlConnection,
    runtime: Runtime,
}

impl MySqlChapterSource {
    /// Open a connection and ping it.
    pub fn connect(options: &MySqlConnectOptions) -> Result<Self, SourceError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceError::Runtime)?;

        let conn = runtime.block_on(async {
            let mut conn = MySqlConnection::connect_with(options).await?;
            conn.ping().await?;
            Ok::<_, sqlx::Error>(conn)
        });
        let conn = conn.map_err(SourceError::Connect)?;

        info!("Database connection established");
        Ok(Self { conn, runtime })
    }

    /// Close the connection gracefully.
    pub fn close(self) {
        let Self { conn, runtime } = self;
        if let Err(e) = runtime.block_on(conn.close()) {
            warn!("error closing database connection: {e}");
        }
    }
}

impl ChapterSource for MySqlChapterSource {
    fn fetch_chapters(&mut self) -> Result<Vec<Chapter>, SourceError> {
        let rows = self
            .runtime
            .block_on(sqlx::query(CHAPTERS_QUERY).fetch_all(&mut self.conn))
            .map_err(SourceError::Query)?;

        let total = rows.len();
        let chapters = collect_decoded(rows.iter().map(decode_row));
        let skipped = total - chapters.len();
        if skipped > 0 {
            warn!("Skipped {skipped} of {total} chapter rows");
        }
        info!("Fetched {} chapters from the database", chapters.len());
        Ok(chapters)
    }
}
