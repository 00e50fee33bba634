use crate::db::pending_profiles;
use crate::domain::profiles::ProfileReconciler;
use crate::notifications::Notice;
use crate::router::handle;
use crate::tests::fake_backend::{Call, FakeBackend};
use crate::tests::utils::*;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn backend() -> Arc<FakeBackend> {
    Arc::new(FakeBackend::new().with_user("u1", "ana@example.com", "secret"))
}

#[test]
fn auth_page_opens_in_login_mode() {
    let app = test_app(backend());

    let resp = handle(get("/auth", None), &app).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains(r#"name="mode" value="login""#));
    assert!(!body.contains(r#"id="full_name""#));
}

#[test]
fn register_mode_from_query() {
    let app = test_app(backend());

    let body = body_string(handle(get("/auth?mode=register", None), &app).unwrap());
    assert!(body.contains(r#"name="mode" value="register""#));
    assert!(body.contains(r#"id="full_name""#));
}

#[test]
fn switching_modes_keeps_every_field() {
    let backend = backend();
    let app = test_app(backend.clone());

    let form = "mode=login&intent=switch&email=ana%40example.com&password=pw&full_name=Ana+Lima";
    let body = body_string(handle(post_form("/auth", form, None, false), &app).unwrap());

    assert!(body.contains(r#"name="mode" value="register""#));
    assert!(body.contains(r#"value="ana@example.com""#));
    assert!(body.contains(r#"value="Ana Lima""#));
    assert!(body.contains(r#"type="password" placeholder="••••••••" value="pw""#));
    assert!(backend.calls().is_empty());

    // And back again.
    let form = "mode=register&intent=switch&email=ana%40example.com&password=pw&full_name=Ana+Lima";
    let body = body_string(handle(post_form("/auth", form, None, false), &app).unwrap());
    assert!(body.contains(r#"name="mode" value="login""#));
    assert!(body.contains(r#"type="hidden" name="full_name" value="Ana Lima""#));
}

#[test]
fn login_sets_session_and_redirects_home() {
    let app = test_app(backend());

    let form = "mode=login&intent=submit&email=Ana%40Example.com&password=secret";
    let resp = handle(post_form("/auth", form, None, false), &app).unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location").as_deref(), Some("/"));

    let raw = set_cookie_value(&resp, "session").expect("session cookie");
    assert!(!raw.is_empty());
    let notice = Notice::decode(&set_cookie_value(&resp, "notice").unwrap()).unwrap();
    assert_eq!(notice.title, "Signed in");
    assert!(!notice.is_destructive());

    // The cookie now identifies the visitor.
    let body = body_string(handle(get("/profile", Some(&session_header(&raw))), &app).unwrap());
    assert!(body.contains("ana@example.com"));
}

#[test]
fn login_error_shows_backend_message_and_keeps_fields() {
    let app = test_app(backend());

    let form = "mode=login&intent=submit&email=ana%40example.com&password=wrong";
    let resp = handle(post_form("/auth", form, None, false), &app).unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(set_cookie_value(&resp, "session"), None);

    let body = body_string(resp);
    assert!(body.contains("toast-destructive"));
    assert!(body.contains("Invalid login credentials"));
    assert!(body.contains(r#"value="ana@example.com""#));
}

#[test]
fn register_creates_account_and_switches_to_login() {
    let backend = backend();
    let app = test_app(backend.clone());

    let form = "mode=register&intent=submit&email=bia%40example.com&password=pw&full_name=Bia+Souza";
    let resp = handle(post_form("/auth", form, None, false), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(set_cookie_value(&resp, "session"), None);

    let body = body_string(resp);
    assert!(body.contains("Account created"));
    assert!(body.contains(r#"name="mode" value="login""#));
    assert!(body.contains(r#"value="bia@example.com""#));

    assert_eq!(backend.profile_name("user-2").as_deref(), Some("Bia Souza"));
}

#[test]
fn register_requires_full_name() {
    let backend = backend();
    let app = test_app(backend.clone());

    let form = "mode=register&intent=submit&email=bia%40example.com&password=pw&full_name=+";
    let body = body_string(handle(post_form("/auth", form, None, false), &app).unwrap());

    assert!(body.contains("Full name is required."));
    assert!(body.contains(r#"name="mode" value="register""#));
    assert!(backend.calls().is_empty());
}

#[test]
fn register_error_shows_backend_message() {
    let app = test_app(backend());

    let form = "mode=register&intent=submit&email=ana%40example.com&password=pw&full_name=Ana";
    let body = body_string(handle(post_form("/auth", form, None, false), &app).unwrap());

    assert!(body.contains("Could not create account"));
    assert!(body.contains("User already registered"));
}

#[test]
fn queued_profile_is_created_on_next_sign_in() {
    let backend = backend();
    backend.fail_profile_insert(true);
    let app = test_app(backend.clone());
    ProfileReconciler::new(app.db.clone(), backend.clone(), Duration::from_secs(3600))
        .spawn(app.events.subscribe());

    let form = "mode=register&intent=submit&email=bia%40example.com&password=pw&full_name=Bia";
    handle(post_form("/auth", form, None, false), &app).unwrap();

    let pending = |db: &crate::db::Database| {
        db.with_conn(|c| pending_profiles::find(c, "user-2")).unwrap()
    };
    assert!(pending(&app.db).is_some());
    assert_eq!(backend.profile_name("user-2"), None);

    backend.fail_profile_insert(false);
    let form = "mode=login&intent=submit&email=bia%40example.com&password=pw";
    let resp = handle(post_form("/auth", form, None, false), &app).unwrap();
    assert_eq!(resp.status(), 303);

    let deadline = Instant::now() + Duration::from_secs(5);
    while pending(&app.db).is_some() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    assert!(pending(&app.db).is_none());
    assert_eq!(backend.profile_name("user-2").as_deref(), Some("Bia"));
    assert!(backend
        .calls()
        .contains(&Call::InsertProfile("user-2".into(), Some("access-user-2".into()))));
}

#[test]
fn unreachable_backend_during_refresh_keeps_session_cookie() {
    let backend = backend();
    let app = test_app(backend.clone());
    let raw = stale_session_cookie(&app, "ana@example.com", "secret");

    backend.fail_refresh(true);
    let resp = handle(get("/", Some(&session_header(&raw))), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(set_cookie_value(&resp, "session"), None);

    // Backend is back: the same cookie refreshes and stays signed in.
    backend.fail_refresh(false);
    let resp = handle(get("/", Some(&session_header(&raw))), &app).unwrap();
    assert_eq!(set_cookie_value(&resp, "session"), None);

    let refreshes = backend
        .calls()
        .into_iter()
        .filter(|c| *c == Call::RefreshSession)
        .count();
    assert_eq!(refreshes, 2);
}

#[test]
fn rejected_refresh_clears_session_cookie() {
    let backend = backend();
    let app = test_app(backend.clone());
    let raw = stale_session_cookie(&app, "ana@example.com", "secret");

    backend.reject_refresh(true);
    let resp = handle(get("/", Some(&session_header(&raw))), &app).unwrap();
    assert_eq!(set_cookie_value(&resp, "session").as_deref(), Some(""));
}
