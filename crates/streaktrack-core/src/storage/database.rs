//! SQLite-backed user store.
//!
//! One row per user, keyed by name. `last_commented` is stored as RFC 3339
//! text (NULL for a brand-new user) and normalized through
//! [`parse_last_commented`] on every load, so legacy date-only values never
//! reach the engine. Updates are guarded: the write only lands if
//! `last_commented` still holds the value observed at read time, which
//! keeps two concurrent log attempts from both counting.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{CoreError, Result, StoreError};
use crate::user::{parse_last_commented, UserRecord};

/// One leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub streak: u32,
    pub total_days: u32,
}

/// SQLite database holding all user records.
pub struct UserStore {
    conn: Connection,
}

impl UserStore {
    /// Open the store at `<data dir>/streaktrack.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("streaktrack.db");
        let conn = Connection::open(&path).map_err(|source| StoreError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StoreError::from)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                name           TEXT PRIMARY KEY,
                streak         INTEGER NOT NULL DEFAULT 0,
                total_days     INTEGER NOT NULL DEFAULT 0,
                last_commented TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_users_streak ON users(streak);",
        )?;
        Ok(())
    }

    /// Fetch one user by name, normalizing the stored timestamp.
    ///
    /// # Errors
    /// Returns a data error if the stored `last_commented` value is
    /// unparseable; this is fatal rather than treated as "no activity".
    pub fn fetch_user(&self, name: &str) -> Result<Option<UserRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT name, streak, total_days, last_commented FROM users WHERE name = ?1",
                params![name],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u32>(1)?,
                        row.get::<_, u32>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(StoreError::from)?;

        let Some((name, streak, total_days, raw_last)) = row else {
            return Ok(None);
        };

        let last_commented = raw_last
            .map(|raw| parse_last_commented(&name, &raw))
            .transpose()?;

        Ok(Some(UserRecord {
            name,
            streak,
            total_days,
            last_commented,
        }))
    }

    /// Insert a brand-new record.
    ///
    /// # Errors
    /// Propagates store failures unmodified, including a constraint
    /// violation when the name already exists.
    pub fn create_user(&self, record: &UserRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (name, streak, total_days, last_commented)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.name,
                record.streak,
                record.total_days,
                record.last_commented.map(|ts| ts.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Write back an updated record, guarded against concurrent writes.
    ///
    /// `expected_last` must be the `last_commented` value the caller read
    /// before evaluating eligibility. If the row has changed since, nothing
    /// is written and [`StoreError::Conflict`] is returned; callers surface
    /// it rather than retry.
    pub fn update_user(
        &self,
        updated: &UserRecord,
        expected_last: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE users SET streak = ?1, total_days = ?2, last_commented = ?3
             WHERE name = ?4 AND last_commented IS ?5",
            params![
                updated.streak,
                updated.total_days,
                updated.last_commented.map(|ts| ts.to_rfc3339()),
                updated.name,
                expected_last.map(|ts| ts.to_rfc3339()),
            ],
        )?;

        if changed == 1 {
            return Ok(());
        }

        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM users WHERE name = ?1",
                params![updated.name],
                |_| Ok(()),
            )
            .optional()
            .map_err(StoreError::from)?
            .is_some();

        let err = if exists {
            StoreError::Conflict {
                name: updated.name.clone(),
            }
        } else {
            StoreError::UnknownUser(updated.name.clone())
        };
        Err(CoreError::Store(err))
    }

    /// All known user names, sorted.
    pub fn user_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM users ORDER BY name")
            .map_err(StoreError::from)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(StoreError::from)?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row.map_err(StoreError::from)?);
        }
        Ok(names)
    }

    /// Top streak holders, descending by streak (ties by name).
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT name, streak, total_days FROM users
                 ORDER BY streak DESC, name ASC LIMIT ?1",
            )
            .map_err(StoreError::from)?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(LeaderboardEntry {
                    name: row.get(0)?,
                    streak: row.get(1)?,
                    total_days: row.get(2)?,
                })
            })
            .map_err(StoreError::from)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(StoreError::from)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;

    fn store_with(records: &[(&str, u32, u32)]) -> UserStore {
        let store = UserStore::open_memory().unwrap();
        for (name, streak, total_days) in records {
            store
                .create_user(&UserRecord {
                    name: (*name).to_string(),
                    streak: *streak,
                    total_days: *total_days,
                    last_commented: Some(Utc::now()),
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn create_and_fetch_round_trip() {
        let store = UserStore::open_memory().unwrap();
        store.create_user(&UserRecord::new("asha")).unwrap();

        let record = store.fetch_user("asha").unwrap().unwrap();
        assert_eq!(record.streak, 0);
        assert_eq!(record.total_days, 0);
        assert!(record.last_commented.is_none());

        assert!(store.fetch_user("nobody").unwrap().is_none());
    }

    #[test]
    fn guarded_update_applies_when_unchanged() {
        let store = UserStore::open_memory().unwrap();
        store.create_user(&UserRecord::new("asha")).unwrap();

        let read = store.fetch_user("asha").unwrap().unwrap();
        let now = Utc::now();
        let updated = UserRecord {
            streak: 1,
            total_days: 1,
            last_commented: Some(now),
            ..read.clone()
        };
        store.update_user(&updated, read.last_commented).unwrap();

        let after = store.fetch_user("asha").unwrap().unwrap();
        assert_eq!(after.streak, 1);
        assert_eq!(after.total_days, 1);
        assert!(after.last_commented.is_some());
    }

    #[test]
    fn guarded_update_conflicts_when_row_moved() {
        let store = UserStore::open_memory().unwrap();
        store.create_user(&UserRecord::new("asha")).unwrap();
        let read = store.fetch_user("asha").unwrap().unwrap();

        // Another session logs first.
        let first = UserRecord {
            streak: 1,
            total_days: 1,
            last_commented: Some(Utc::now()),
            ..read.clone()
        };
        store.update_user(&first, read.last_commented).unwrap();

        // Our write, still carrying the stale expectation, must not land.
        let second = UserRecord {
            streak: 1,
            total_days: 1,
            last_commented: Some(Utc::now()),
            ..read.clone()
        };
        let err = store.update_user(&second, read.last_commented).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Store(StoreError::Conflict { .. })
        ));

        let after = store.fetch_user("asha").unwrap().unwrap();
        assert_eq!(after.total_days, 1);
    }

    #[test]
    fn update_of_missing_user_is_unknown() {
        let store = UserStore::open_memory().unwrap();
        let err = store
            .update_user(&UserRecord::new("ghost"), None)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Store(StoreError::UnknownUser(_))
        ));
    }

    #[test]
    fn legacy_date_only_value_is_normalized() {
        let store = UserStore::open_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO users (name, streak, total_days, last_commented)
                 VALUES ('vikram', 3, 9, '2025-03-14')",
                [],
            )
            .unwrap();

        let record = store.fetch_user("vikram").unwrap().unwrap();
        let last = record.last_commented.unwrap();
        assert_eq!(last.to_rfc3339(), "2025-03-14T00:00:00+00:00");
    }

    #[test]
    fn garbled_timestamp_is_a_fatal_data_error() {
        let store = UserStore::open_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO users (name, streak, total_days, last_commented)
                 VALUES ('vikram', 3, 9, 'not-a-date')",
                [],
            )
            .unwrap();

        let err = store.fetch_user("vikram").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Data(DataError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn leaderboard_sorts_and_truncates() {
        let store = store_with(&[
            ("asha", 12, 40),
            ("bela", 7, 7),
            ("chand", 30, 90),
            ("dev", 1, 1),
            ("esha", 30, 31),
            ("farid", 0, 5),
        ]);

        let top = store.leaderboard(5).unwrap();
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].name, "chand");
        assert_eq!(top[1].name, "esha");
        assert_eq!(top[2].name, "asha");
        assert_eq!(top[2].total_days, 40);
        assert_eq!(top[4].name, "dev");
    }

    #[test]
    fn user_names_sorted() {
        let store = store_with(&[("zoya", 1, 1), ("asha", 2, 2)]);
        assert_eq!(store.user_names().unwrap(), vec!["asha", "zoya"]);
    }

    #[test]
    fn duplicate_create_propagates() {
        let store = UserStore::open_memory().unwrap();
        store.create_user(&UserRecord::new("asha")).unwrap();
        assert!(store.create_user(&UserRecord::new("asha")).is_err());
    }
}
