use crate::app::App;
use crate::auth::provider::{CurrentUser, SessionProvider};
use crate::backend::AuthEvents;
use crate::clock::now_unix;
use crate::db::{init_db, Database};
use crate::tests::fake_backend::FakeBackend;
use astra::{Body, Request, Response};
use std::io::Read;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// Removes the database file (and any SQLite side files) on drop.
pub struct DbFile(PathBuf);

impl Drop for DbFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
        for suffix in ["-journal", "-wal", "-shm"] {
            let mut side = self.0.clone().into_os_string();
            side.push(suffix);
            let _ = std::fs::remove_file(side);
        }
    }
}

/// A [`Database`] whose file lives as long as the test holds it.
pub struct TestDb {
    db: Database,
    _file: DbFile,
}

impl Deref for TestDb {
    type Target = Database;

    fn deref(&self) -> &Database {
        &self.db
    }
}

/// Fresh database file per call, built from the production schema.
pub fn init_test_db() -> TestDb {
    let path = std::env::temp_dir().join(format!(
        "rental_simple_test_{}_{}.sqlite3",
        std::process::id(),
        NEXT_DB.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = std::fs::remove_file(&path);
    let file = DbFile(path);

    let db = Database::new(file.0.to_string_lossy().into_owned());
    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    TestDb { db, _file: file }
}

/// An [`App`] over a [`TestDb`]; the database file goes away with it.
pub struct TestApp {
    app: App,
    _file: DbFile,
}

impl Deref for TestApp {
    type Target = App;

    fn deref(&self) -> &App {
        &self.app
    }
}

pub fn signed_in_user(id: &str) -> CurrentUser {
    CurrentUser::for_tests(id)
}

pub fn test_app(backend: Arc<FakeBackend>) -> TestApp {
    let TestDb { db, _file } = init_test_db();
    TestApp {
        app: App::new(db, backend, AuthEvents::new(), "http://localhost:3000"),
        _file,
    }
}

/// Sign in through the provider and return the raw session cookie value.
pub fn sign_in_cookie(app: &App, email: &str, password: &str) -> String {
    SessionProvider::new(&app.db, app.backend.as_ref(), &app.events)
        .sign_in(email, password, now_unix())
        .unwrap_or_else(|e| panic!("sign-in failed: {e}"))
}

/// Like [`sign_in_cookie`], but signed in two hours ago so the access token
/// has already expired and the next request must refresh it.
pub fn stale_session_cookie(app: &App, email: &str, password: &str) -> String {
    SessionProvider::new(&app.db, app.backend.as_ref(), &app.events)
        .sign_in(email, password, now_unix() - 2 * 3600)
        .unwrap_or_else(|e| panic!("sign-in failed: {e}"))
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request {
    let mut builder = http::Request::builder().method("GET").uri(uri);
    if let Some(c) = cookie {
        builder = builder.header("Cookie", c);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>, htmx: bool) -> Request {
    let mut builder = http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        builder = builder.header("Cookie", c);
    }
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn session_header(raw: &str) -> String {
    format!("session={raw}")
}

pub fn set_cookies(resp: &Response) -> Vec<String> {
    resp.headers()
        .get_all("Set-Cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Value of a cookie set by `resp`, if any.
pub fn set_cookie_value(resp: &Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(resp).into_iter().find_map(|c| {
        c.strip_prefix(&prefix)
            .and_then(|rest| rest.split(';').next())
            .map(str::to_string)
    })
}

pub fn header(resp: &Response, name: &str) -> Option<String> {
    resp.headers()
        .get(name)
        .map(|v| v.to_str().unwrap().to_string())
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}
