//! SQLite-backed record store.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::warn;

use super::error::StoreError;
use super::{EmbeddedEntry, FaqEntry, RecordStore, decode_embedding, encode_embedding};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS faq_entries (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    question             TEXT NOT NULL,
    answer               TEXT NOT NULL,
    embedding            BLOB,
    embedding_model      TEXT,
    embedding_updated_at TEXT
)";

/// FAQ record store over a single SQLite database file.
///
/// Row operations are short; the connection is shared behind a mutex rather
/// than pooled.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and ensures the
    /// schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.display().to_string(),
            source,
        })?;

        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store, mainly for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts a question/answer pair without an embedding, returning its id.
    pub fn insert(&self, question: &str, answer: &str) -> Result<i64, StoreError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO faq_entries (question, answer) VALUES (?1, ?2)",
            params![question, answer],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Direct connection access for tests that need to bypass the codec.
    #[cfg(test)]
    pub(crate) fn raw_conn(&self) -> parking_lot::MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Reads one full record, `None` if the id does not exist.
    pub fn entry(&self, id: i64) -> Result<Option<FaqEntry>, StoreError> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(
                "SELECT id, question, answer, embedding, embedding_model, embedding_updated_at
                 FROM faq_entries WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<Vec<u8>>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                },
            )
            .optional()?;

        Ok(row.map(
            |(id, question, answer, blob, embedding_model, updated_at)| FaqEntry {
                id,
                question,
                answer,
                embedding: blob.as_deref().and_then(decode_embedding),
                embedding_model,
                embedding_updated_at: updated_at
                    .as_deref()
                    .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                    .map(|dt| dt.with_timezone(&Utc)),
            },
        ))
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn load_embedded(&self) -> Result<Vec<EmbeddedEntry>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, answer, embedding FROM faq_entries
             WHERE embedding IS NOT NULL ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Vec<u8>>(2)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, answer, blob) = row?;
            match decode_embedding(&blob) {
                Some(embedding) => entries.push(EmbeddedEntry {
                    id,
                    answer,
                    embedding,
                }),
                None => {
                    warn!(
                        entry_id = id,
                        blob_len = blob.len(),
                        "Skipping entry: stored embedding blob is malformed"
                    );
                }
            }
        }

        Ok(entries)
    }

    async fn question(&self, id: i64) -> Result<Option<String>, StoreError> {
        let conn = self.conn.lock();
        let question = conn
            .query_row(
                "SELECT question FROM faq_entries WHERE id = ?1",
                params![id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(question)
    }

    async fn questions(&self) -> Result<Vec<(i64, String)>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, question FROM faq_entries ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    async fn faq_pairs(&self) -> Result<Vec<(String, String)>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT question, answer FROM faq_entries ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(StoreError::from)
    }

    async fn update_embedding(
        &self,
        id: i64,
        embedding: &[f32],
        model: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let affected = conn.execute(
            "UPDATE faq_entries
             SET embedding = ?1, embedding_model = ?2, embedding_updated_at = ?3
             WHERE id = ?4",
            params![
                encode_embedding(embedding),
                model,
                updated_at.to_rfc3339(),
                id
            ],
        )?;

        if affected == 0 {
            return Err(StoreError::RowNotFound { id });
        }

        Ok(())
    }
}
