// src/db/pending_profiles.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

#[derive(Debug, Clone, PartialEq)]
pub struct PendingProfile {
    pub user_id: String,
    pub full_name: String,
    pub attempts: i64,
    pub last_error: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

fn row_to_pending(row: &rusqlite::Row<'_>) -> rusqlite::Result<PendingProfile> {
    Ok(PendingProfile {
        user_id: row.get(0)?,
        full_name: row.get(1)?,
        attempts: row.get(2)?,
        last_error: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Record a profile that still has to be created. The first failed attempt
/// counts, so a fresh row starts at `attempts = 1`.
pub fn enqueue(
    conn: &Connection,
    user_id: &str,
    full_name: &str,
    error: &str,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into pending_profiles (user_id, full_name, attempts, last_error, created_at, updated_at)
        values (?1, ?2, 1, ?3, ?4, ?4)
        on conflict(user_id) do update set
          full_name  = excluded.full_name,
          attempts   = pending_profiles.attempts + 1,
          last_error = excluded.last_error,
          updated_at = excluded.updated_at
        "#,
        params![user_id, full_name, error, now],
    )
    .map_err(|e| ServerError::DbError(format!("enqueue pending profile failed: {e}")))?;
    Ok(())
}

pub fn find(conn: &Connection, user_id: &str) -> Result<Option<PendingProfile>, ServerError> {
    conn.query_row(
        r#"
        select user_id, full_name, attempts, last_error, created_at, updated_at
        from pending_profiles
        where user_id = ?
        "#,
        params![user_id],
        row_to_pending,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select pending profile failed: {e}")))
}

/// Oldest-first batch for the periodic sweep.
pub fn list_oldest(conn: &Connection, limit: usize) -> Result<Vec<PendingProfile>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select user_id, full_name, attempts, last_error, created_at, updated_at
            from pending_profiles
            order by updated_at asc
            limit ?
            "#,
        )
        .map_err(|e| ServerError::DbError(format!("prepare pending profiles failed: {e}")))?;

    let rows = stmt
        .query_map(params![limit as i64], row_to_pending)
        .map_err(|e| ServerError::DbError(format!("query pending profiles failed: {e}")))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::DbError(format!("read pending profile failed: {e}")))
}

pub fn record_failure(
    conn: &Connection,
    user_id: &str,
    error: &str,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        update pending_profiles
        set attempts = attempts + 1, last_error = ?, updated_at = ?
        where user_id = ?
        "#,
        params![error, now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update pending profile failed: {e}")))?;
    Ok(())
}

pub fn remove(conn: &Connection, user_id: &str) -> Result<bool, ServerError> {
    let n = conn
        .execute(
            "delete from pending_profiles where user_id = ?",
            params![user_id],
        )
        .map_err(|e| ServerError::DbError(format!("delete pending profile failed: {e}")))?;
    Ok(n > 0)
}
