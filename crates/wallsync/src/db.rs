use std::collections::{HashMap, HashSet};
use std::path::Path;

use log::info;
use rusqlite::{params, Connection, OpenFlags};

use crate::catalog::{basename, WallpaperRecord};
use crate::error::DbError;

/// One database handle per run, passed into the components that need it.
pub struct Database {
    conn: Connection,
}

/// Snapshot of the `wallpapers` table taken at the start of a run. All
/// reconciliation and collision checks work against this snapshot rather than
/// re-querying mid-run.
#[derive(Debug, Default)]
pub struct DbSnapshot {
    /// `(id, file_path)` rows in table order.
    pub rows: Vec<(i64, String)>,
    pub ids: HashSet<i64>,
    /// Basename of `file_path` -> id.
    pub ids_by_basename: HashMap<String, i64>,
}

impl Database {
    /// Open an existing catalog database. A missing or unreadable file is a
    /// connectivity error and aborts the run; this never creates a database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .map_err(|e| DbError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self { conn })
    }

    pub fn snapshot(&self) -> Result<DbSnapshot, DbError> {
        let mut stmt = self.conn.prepare("SELECT id, file_path FROM wallpapers")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut ids = HashSet::with_capacity(rows.len());
        let mut ids_by_basename = HashMap::with_capacity(rows.len());
        for (id, file_path) in &rows {
            ids.insert(*id);
            ids_by_basename.insert(basename(file_path), *id);
        }

        info!("Database snapshot: {} wallpapers", rows.len());
        Ok(DbSnapshot {
            rows,
            ids,
            ids_by_basename,
        })
    }

    /// Full records, used when the manifest is rebuilt from scratch.
    pub fn all_records(&self) -> Result<Vec<WallpaperRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, description, file_path, file_size, width, height, \
             category, tags, format, views, likes, created_at, updated_at \
             FROM wallpapers ORDER BY id",
        )?;
        let records = stmt
            .query_map([], |row| {
                Ok(WallpaperRecord {
                    id: row.get(0)?,
                    user_id: row.get::<_, Option<i64>>(1)?.unwrap_or(1),
                    title: row.get(2)?,
                    description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    file_path: row.get(4)?,
                    file_size: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    width: row.get::<_, Option<u32>>(6)?.unwrap_or(0),
                    height: row.get::<_, Option<u32>>(7)?.unwrap_or(0),
                    category: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
                    tags: row
                        .get::<_, Option<String>>(9)?
                        .unwrap_or_default()
                        .split_whitespace()
                        .map(str::to_string)
                        .collect(),
                    format: row.get::<_, Option<String>>(10)?.unwrap_or_default(),
                    views: row.get::<_, Option<i64>>(11)?.unwrap_or(0),
                    likes: row.get::<_, Option<i64>>(12)?.unwrap_or(0),
                    created_at: row.get::<_, Option<String>>(13)?.unwrap_or_default(),
                    updated_at: row.get::<_, Option<String>>(14)?.unwrap_or_default(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Append-only insert of newly allocated records, committed as one
    /// transaction. Existing rows are never updated or deleted.
    pub fn insert_records(&mut self, records: &[WallpaperRecord]) -> Result<usize, DbError> {
        if records.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO wallpapers (id, user_id, title, description, file_path, file_size, \
                 width, height, category, tags, format, views, likes, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.id,
                    record.user_id,
                    record.title,
                    record.description,
                    record.file_path,
                    record.file_size,
                    record.width,
                    record.height,
                    record.category,
                    record.tags.join(" "),
                    record.format,
                    record.views,
                    record.likes,
                    record.created_at,
                    record.updated_at,
                ])?;
            }
        }
        tx.commit()?;

        info!("Inserted {} new wallpapers into the database", records.len());
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CREATE_TABLE: &str = "CREATE TABLE wallpapers (
        id INTEGER PRIMARY KEY,
        user_id INTEGER,
        title TEXT NOT NULL,
        description TEXT,
        file_path TEXT NOT NULL,
        file_size TEXT,
        width INTEGER,
        height INTEGER,
        category TEXT,
        tags TEXT,
        format TEXT,
        views INTEGER DEFAULT 0,
        likes INTEGER DEFAULT 0,
        created_at TEXT,
        updated_at TEXT
    )";

    fn create_database(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("wallpapers.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute(CREATE_TABLE, []).unwrap();
        path
    }

    fn sample_record(id: i64, filename: &str) -> WallpaperRecord {
        WallpaperRecord {
            id,
            user_id: 1,
            title: filename.trim_end_matches(".jpg").to_string(),
            description: String::new(),
            file_path: format!("static/wallpapers/{}", filename),
            file_size: "1.0 KB".to_string(),
            width: 16,
            height: 9,
            category: "其他".to_string(),
            tags: vec!["其他".to_string()],
            format: "JPEG".to_string(),
            views: 0,
            likes: 0,
            created_at: "2025-01-01 00:00:00".to_string(),
            updated_at: "2025-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_open_missing_database_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = Database::open(temp_dir.path().join("absent.db"));
        assert!(matches!(result, Err(DbError::Open { .. })));
    }

    #[test]
    fn test_snapshot_of_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_database(&temp_dir);

        let db = Database::open(&path).unwrap();
        let snapshot = db.snapshot().unwrap();

        assert!(snapshot.rows.is_empty());
        assert!(snapshot.ids.is_empty());
    }

    #[test]
    fn test_insert_and_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_database(&temp_dir);

        let mut db = Database::open(&path).unwrap();
        let records = vec![sample_record(202501011, "a.jpg"), sample_record(202501012, "b.jpg")];
        assert_eq!(db.insert_records(&records).unwrap(), 2);

        let snapshot = db.snapshot().unwrap();
        assert_eq!(snapshot.rows.len(), 2);
        assert!(snapshot.ids.contains(&202501011));
        assert_eq!(snapshot.ids_by_basename.get("a.jpg"), Some(&202501011));

        let all = db.all_records().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], records[0]);
    }

    #[test]
    fn test_insert_empty_slice_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_database(&temp_dir);

        let mut db = Database::open(&path).unwrap();
        assert_eq!(db.insert_records(&[]).unwrap(), 0);
    }

    #[test]
    fn test_snapshot_without_table_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.db");
        Connection::open(&path).unwrap();

        let db = Database::open(&path).unwrap();
        assert!(db.snapshot().is_err());
    }
}
