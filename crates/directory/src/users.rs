use {async_trait::async_trait, sqlx::SqlitePool};

use crate::error::{Error, Result};

/// Profile fields carried by an inbound event's sender.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A persisted directory record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub region_id: Option<i64>,
    pub joined_at: i64,
}

/// Persistent keyed store of user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Insert a new record or refresh profile fields on an existing one.
    ///
    /// Never touches `region_id`; `joined_at` is set on first insert only.
    async fn upsert(&self, profile: &UserProfile, now: i64) -> Result<()>;

    async fn get(&self, user_id: i64) -> Result<Option<UserRecord>>;

    async fn region(&self, user_id: i64) -> Result<Option<i64>>;

    /// Set the selected region. Fails with [`Error::RecordMissing`] when no
    /// record exists for `user_id`.
    async fn set_region(&self, user_id: i64, region_id: i64) -> Result<()>;

    /// Every known user id, in insertion order. Read by the broadcast
    /// dispatcher at dispatch time.
    async fn all_user_ids(&self) -> Result<Vec<i64>>;

    async fn count(&self) -> Result<u64>;
}

/// SQLite-backed user directory.
pub struct SqliteUserDirectory {
    pool: SqlitePool,
}

impl SqliteUserDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the users table schema.
    pub async fn init(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS users (
                user_id    INTEGER PRIMARY KEY,
                username   TEXT,
                first_name TEXT,
                last_name  TEXT,
                region_id  INTEGER,
                joined_at  INTEGER NOT NULL
            )"#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn upsert(&self, profile: &UserProfile, now: i64) -> Result<()> {
        // region_id and joined_at are deliberately absent from the DO UPDATE
        // set: re-registration must not clear an already-selected region.
        sqlx::query(
            r#"INSERT INTO users (user_id, username, first_name, last_name, region_id, joined_at)
               VALUES (?, ?, ?, ?, NULL, ?)
               ON CONFLICT(user_id) DO UPDATE SET
                 username = excluded.username,
                 first_name = excluded.first_name,
                 last_name = excluded.last_name"#,
        )
        .bind(profile.user_id)
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, user_id: i64) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn region(&self, user_id: i64) -> Result<Option<i64>> {
        let row: Option<(Option<i64>,)> =
            sqlx::query_as("SELECT region_id FROM users WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.and_then(|(region,)| region))
    }

    async fn set_region(&self, user_id: i64, region_id: i64) -> Result<()> {
        let result = sqlx::query("UPDATE users SET region_id = ? WHERE user_id = ?")
            .bind(region_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::RecordMissing { user_id });
        }
        Ok(())
    }

    async fn all_user_ids(&self) -> Result<Vec<i64>> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT user_id FROM users ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}
