// responses/cookies.rs
use crate::auth::sessions::{SESSION_COOKIE, SESSION_TTL_SECS};
use crate::notifications::{Notice, NOTICE_COOKIE};

const NOTICE_TTL_SECS: i64 = 60;

fn build(name: &str, value: &str, max_age: i64, secure: bool) -> String {
    let mut c = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        c.push_str("; Secure");
    }
    c
}

pub fn session_cookie(raw_token: &str, secure: bool) -> String {
    build(SESSION_COOKIE, raw_token, SESSION_TTL_SECS, secure)
}

pub fn notice_cookie(notice: &Notice, secure: bool) -> String {
    build(NOTICE_COOKIE, &notice.encode(), NOTICE_TTL_SECS, secure)
}

pub fn clear_cookie(name: &str, secure: bool) -> String {
    build(name, "", 0, secure)
}
