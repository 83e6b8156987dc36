//! Last-known-good copies of upstream payloads.
//!
//! Each source keeps at most one snapshot. Records are stored raw, exactly as
//! fetched, so a later alias change is applied when the cache is read back.

use crate::error::{Result, StoreError};
use leadboard_core::{SnapshotId, SourceTag};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotMeta {
    pub id: SnapshotId,
    pub source: SourceTag,
    pub origin: String,
    pub fetched_at: i64,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub meta: SnapshotMeta,
    pub records: Vec<Value>,
}

type SnapshotMetaRow = (String, String, String, i64, i64);

pub struct SnapshotsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SnapshotsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Swaps the stored snapshot for `source` with `records` in one transaction.
    pub fn replace(
        &self,
        source: SourceTag,
        origin: &str,
        fetched_at: i64,
        records: &[Value],
    ) -> Result<SnapshotMeta> {
        let meta = SnapshotMeta {
            id: SnapshotId::new(),
            source,
            origin: origin.to_string(),
            fetched_at,
            record_count: records.len(),
        };

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM snapshots WHERE source = ?1;",
            [source.as_str()],
        )?;
        tx.execute(
            "INSERT INTO snapshots (id, source, origin, fetched_at, record_count)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                meta.id.to_string(),
                source.as_str(),
                meta.origin,
                meta.fetched_at,
                meta.record_count as i64
            ],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO snapshot_records (snapshot_id, position, payload)
                 VALUES (?1, ?2, ?3);",
            )?;
            let id = meta.id.to_string();
            for (position, record) in records.iter().enumerate() {
                let payload = serde_json::to_string(record)?;
                stmt.execute(params![id, position as i64, payload])?;
            }
        }
        tx.commit()?;
        Ok(meta)
    }

    pub fn meta(&self, source: SourceTag) -> Result<Option<SnapshotMeta>> {
        let row: Option<SnapshotMetaRow> = self
            .conn
            .query_row(
                "SELECT id, source, origin, fetched_at, record_count
                 FROM snapshots
                 WHERE source = ?1;",
                [source.as_str()],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                },
            )
            .optional()?;
        row.map(meta_from_row).transpose()
    }

    pub fn list(&self) -> Result<Vec<SnapshotMeta>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source, origin, fetched_at, record_count
             FROM snapshots
             ORDER BY source ASC;",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
            ))
        })?;

        let mut metas = Vec::new();
        for row in rows {
            metas.push(meta_from_row(row?)?);
        }
        Ok(metas)
    }

    pub fn load(&self, source: SourceTag) -> Result<Option<Snapshot>> {
        let Some(meta) = self.meta(source)? else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT payload FROM snapshot_records
             WHERE snapshot_id = ?1
             ORDER BY position ASC;",
        )?;
        let rows = stmt.query_map([meta.id.to_string()], |row| row.get::<_, String>(0))?;

        let mut records = Vec::with_capacity(meta.record_count);
        for payload in rows {
            records.push(serde_json::from_str(&payload?)?);
        }
        Ok(Some(Snapshot { meta, records }))
    }

    /// Drops the snapshot for `source`, or every snapshot when `None`.
    pub fn clear(&self, source: Option<SourceTag>) -> Result<usize> {
        let removed = match source {
            Some(source) => self
                .conn
                .execute("DELETE FROM snapshots WHERE source = ?1;", [source.as_str()])?,
            None => self.conn.execute("DELETE FROM snapshots;", [])?,
        };
        Ok(removed)
    }
}

fn meta_from_row(row: SnapshotMetaRow) -> Result<SnapshotMeta> {
    let (id, source, origin, fetched_at, record_count) = row;
    let id = id
        .parse::<SnapshotId>()
        .map_err(|_| StoreError::InvalidId(id.clone()))?;
    let source = source
        .parse::<SourceTag>()
        .map_err(|_| StoreError::InvalidId(source.clone()))?;
    Ok(SnapshotMeta {
        id,
        source,
        origin,
        fetched_at,
        record_count: usize::try_from(record_count).unwrap_or(0),
    })
}
