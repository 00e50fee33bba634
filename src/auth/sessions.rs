// src/auth/sessions.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::auth::token::{hash_token, new_session_token};
use crate::backend::AuthSession;
use crate::errors::ServerError;

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

/// Backend credentials held on behalf of one browser.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub id: i64,
    pub user_id: String,
    pub email: Option<String>,
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: i64,
    pub expires_at: i64,
}

impl StoredSession {
    pub fn access_expired(&self, now: i64) -> bool {
        self.access_expires_at <= now
    }
}

/// Store the backend session and return the raw cookie token.
pub fn create_session(
    conn: &Connection,
    session: &AuthSession,
    now: i64,
) -> Result<String, ServerError> {
    let raw_token = new_session_token();
    let hash = hash_token(&raw_token);

    conn.execute(
        r#"
        insert into sessions
          (token_hash, user_id, email, access_token, refresh_token,
           access_expires_at, created_at, expires_at)
        values (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            hash.as_slice(),
            session.user.id,
            session.user.email,
            session.access_token,
            session.refresh_token,
            session.access_expires_at(now),
            now,
            now + SESSION_TTL_SECS,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

/// Live (unexpired, unrevoked) session for a cookie token.
pub fn load_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<StoredSession>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select id, user_id, email, access_token, refresh_token, access_expires_at, expires_at
        from sessions
        where token_hash = ?
          and expires_at > ?
          and revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| {
            Ok(StoredSession {
                id: row.get(0)?,
                user_id: row.get(1)?,
                email: row.get(2)?,
                access_token: row.get(3)?,
                refresh_token: row.get(4)?,
                access_expires_at: row.get(5)?,
                expires_at: row.get(6)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

/// Swap in the credentials from a refresh grant.
pub fn store_refreshed(
    conn: &Connection,
    session_id: i64,
    session: &AuthSession,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        update sessions
        set access_token = ?, refresh_token = ?, access_expires_at = ?, email = coalesce(?, email)
        where id = ?
        "#,
        params![
            session.access_token,
            session.refresh_token,
            session.access_expires_at(now),
            session.user.email,
            session_id,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("update session failed: {e}")))?;
    Ok(())
}

pub fn revoke_session(conn: &Connection, session_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update sessions set revoked_at = ? where id = ? and revoked_at is null",
        params![now, session_id],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}

/// Access token of the user's most recent usable session, if any.
pub fn live_access_token(
    conn: &Connection,
    user_id: &str,
    now: i64,
) -> Result<Option<String>, ServerError> {
    conn.query_row(
        r#"
        select access_token
        from sessions
        where user_id = ?
          and revoked_at is null
          and expires_at > ?
          and access_expires_at > ?
        order by created_at desc
        limit 1
        "#,
        params![user_id, now, now],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("live token lookup failed: {e}")))
}

/// Drop rows that can no longer be used. Returns how many were deleted.
pub fn purge_dead_sessions(conn: &Connection, now: i64) -> Result<usize, ServerError> {
    conn.execute(
        "delete from sessions where expires_at <= ? or revoked_at is not null",
        params![now],
    )
    .map_err(|e| ServerError::DbError(format!("purge sessions failed: {e}")))
}
