use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use leptos::logging::{self, log};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::Mutex;

use super::PavilionStore;
use crate::error::StoreError;
use crate::models::pavilion::Pavilion;
use crate::models::review::{NewReview, Review};

#[cfg(test)]
mod tests {
    use super::*;

    // Helper function to create test database
    async fn create_test_db() -> SqliteStore {
        log!("[TEST] Creating in-memory test database");
        let db = SqliteStore::new(":memory:").unwrap();
        db.create_schema().await.unwrap();
        db.seed_pavilions(&[
            Pavilion {
                id: 2,
                name: "Future Hall".into(),
                description: "Robots and more".into(),
                image_url: "https://example.com/future.jpg".into(),
            },
            Pavilion {
                id: 1,
                name: "Japan Pavilion".into(),
                description: "Between lives".into(),
                image_url: "https://example.com/japan.png".into(),
            },
        ])
        .await
        .unwrap();
        db
    }

    #[tokio::test]
    async fn test_schema_creation() {
        let db = create_test_db().await;

        let conn = db.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert!(tables.contains(&"pavilions".to_string()));
        assert!(tables.contains(&"reviews".to_string()));
    }

    #[tokio::test]
    async fn test_pavilions_ordered_by_id() {
        let db = create_test_db().await;
        let pavilions = db.list_pavilions().await.unwrap();
        let ids: Vec<i64> = pavilions.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(pavilions[1].image_url, "https://example.com/future.jpg");
    }

    #[tokio::test]
    async fn test_get_pavilion() {
        let db = create_test_db().await;
        let found = db.get_pavilion(1).await.unwrap();
        assert_eq!(found.map(|p| p.name), Some("Japan Pavilion".to_string()));
        assert_eq!(db.get_pavilion(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_review_lifecycle() {
        let db = create_test_db().await;

        let record = NewReview::new(2, "", "Great show!", true).unwrap();
        let stored = db.insert_review(&record).await.unwrap();
        assert!(stored.id > 0);
        assert_eq!(stored.pavilion_id, 2);
        assert_eq!(stored.name.as_deref(), Some("anonymous"));
        assert_eq!(stored.comment, "Great show!");
        assert_eq!(stored.again, Some(true));

        let reviews = db.list_reviews(Some(2)).await.unwrap();
        assert_eq!(reviews, vec![stored]);
        assert!(db.list_reviews(Some(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reviews_newest_first() {
        let db = create_test_db().await;
        for comment in ["first", "second", "third"] {
            let record = NewReview::new(1, "Yuki", comment, false).unwrap();
            db.insert_review(&record).await.unwrap();
        }
        let record = NewReview::new(2, "Ken", "elsewhere", true).unwrap();
        db.insert_review(&record).await.unwrap();

        let comments: Vec<String> = db
            .list_reviews(Some(1))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.comment)
            .collect();
        assert_eq!(comments, vec!["third", "second", "first"]);

        let all = db.list_reviews(None).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].comment, "elsewhere");
    }

    #[tokio::test]
    async fn test_orphaned_reviews_are_stored() {
        let db = create_test_db().await;
        let record = NewReview::new(404, "Ghost", "Nobody home", false).unwrap();
        db.insert_review(&record).await.unwrap();
        assert_eq!(db.list_reviews(Some(404)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_seed_fixtures_point_at_shipped_images() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let db = SqliteStore::new(":memory:").unwrap();
        db.create_schema().await.unwrap();
        let count = db
            .seed_from_file(&root.join("fixtures/pavilions.json"))
            .await
            .unwrap();
        assert_eq!(count, 3);

        // `/assets` serves the site root, where the assets dir is copied
        for pavilion in db.list_pavilions().await.unwrap() {
            let relative = pavilion.image_url.strip_prefix("/assets/").unwrap();
            assert!(
                root.join("assets").join(relative).is_file(),
                "missing image for {}: {}",
                pavilion.name,
                pavilion.image_url
            );
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_empty_comment() {
        let db = create_test_db().await;
        let record = NewReview {
            pavilion_id: 1,
            name: "Taro".into(),
            comment: "   ".into(),
            again: true,
        };
        assert!(matches!(db.insert_review(&record).await, Err(StoreError::Invalid(_))));
        assert!(db.list_reviews(None).await.unwrap().is_empty());
    }
}

/// Local table store backed by a single SQLite connection.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(db_path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(db_path)?;
        logging::log!("[STORE] Database connection established at: {}", db_path);
        Ok(SqliteStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub async fn create_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS pavilions (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                image_url TEXT NOT NULL DEFAULT ''
            );",
        )
        .map_err(|e| {
            logging::error!("[STORE] Failed creating pavilions table: {}", e);
            e
        })?;

        // no foreign key on pavilion_id: orphaned reviews are stored as-is
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                pavilion_id INTEGER NOT NULL,
                name TEXT,
                comment TEXT NOT NULL,
                again INTEGER,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS reviews_by_pavilion
                ON reviews (pavilion_id, created_at DESC, id DESC);",
        )
        .map_err(|e| {
            logging::error!("[STORE] Failed creating reviews table: {}", e);
            e
        })?;
        Ok(())
    }

    /// Inserts or replaces pavilions. Pavilions are administered outside the app;
    /// this only exists to load fixtures into a local store.
    pub async fn seed_pavilions(&self, pavilions: &[Pavilion]) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        for pavilion in pavilions {
            tx.execute(
                "INSERT OR REPLACE INTO pavilions (id, name, description, image_url)
                 VALUES (?1, ?2, ?3, ?4)",
                params![pavilion.id, pavilion.name, pavilion.description, pavilion.image_url],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Loads a JSON array of pavilions and seeds them. Returns how many were read.
    pub async fn seed_from_file(&self, path: &Path) -> Result<usize, StoreError> {
        let raw = std::fs::read_to_string(path)?;
        let pavilions: Vec<Pavilion> = serde_json::from_str(&raw)?;
        self.seed_pavilions(&pavilions).await?;
        Ok(pavilions.len())
    }
}

fn pavilion_from_row(row: &Row<'_>) -> rusqlite::Result<Pavilion> {
    Ok(Pavilion {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        image_url: row.get(3)?,
    })
}

fn review_from_row(row: &Row<'_>) -> rusqlite::Result<Review> {
    let created_at: String = row.get(5)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);
    Ok(Review {
        id: row.get(0)?,
        pavilion_id: row.get(1)?,
        name: row.get(2)?,
        comment: row.get(3)?,
        again: row.get(4)?,
        created_at,
    })
}

const REVIEW_COLUMNS: &str = "id, pavilion_id, name, comment, again, created_at";

#[async_trait(?Send)]
impl PavilionStore for SqliteStore {
    async fn list_pavilions(&self) -> Result<Vec<Pavilion>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare("SELECT id, name, description, image_url FROM pavilions ORDER BY id ASC")?;
        let pavilions = stmt
            .query_map([], pavilion_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log!("[STORE] Fetched {} pavilions from the database", pavilions.len());
        Ok(pavilions)
    }

    async fn get_pavilion(&self, id: i64) -> Result<Option<Pavilion>, StoreError> {
        let conn = self.conn.lock().await;
        let pavilion = conn
            .query_row(
                "SELECT id, name, description, image_url FROM pavilions WHERE id = ?",
                [id],
                pavilion_from_row,
            )
            .optional()?;
        Ok(pavilion)
    }

    async fn list_reviews(&self, pavilion_id: Option<i64>) -> Result<Vec<Review>, StoreError> {
        let conn = self.conn.lock().await;
        let reviews = match pavilion_id {
            Some(pavilion_id) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM reviews WHERE pavilion_id = ?
                     ORDER BY created_at DESC, id DESC",
                    REVIEW_COLUMNS
                ))?;
                let rows = stmt.query_map([pavilion_id], review_from_row)?;
                let reviews = rows.collect::<Result<Vec<_>, _>>()?;
                reviews
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM reviews ORDER BY created_at DESC, id DESC",
                    REVIEW_COLUMNS
                ))?;
                let rows = stmt.query_map([], review_from_row)?;
                let reviews = rows.collect::<Result<Vec<_>, _>>()?;
                reviews
            }
        };
        Ok(reviews)
    }

    async fn insert_review(&self, record: &NewReview) -> Result<Review, StoreError> {
        let record = record.clone().validated()?;
        // fixed-width RFC 3339 keeps text ordering equal to time ordering
        let created_at = Utc::now().trunc_subsecs(6);
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO reviews (pavilion_id, name, comment, again, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.pavilion_id,
                record.name,
                record.comment,
                record.again,
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        let id = conn.last_insert_rowid();
        log!("[STORE] Review {} stored for pavilion {}", id, record.pavilion_id);
        Ok(Review {
            id,
            pavilion_id: record.pavilion_id,
            name: Some(record.name),
            comment: record.comment,
            again: Some(record.again),
            created_at,
        })
    }
}
