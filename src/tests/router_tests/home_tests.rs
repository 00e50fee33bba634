use crate::errors::ServerError;
use crate::notifications::Notice;
use crate::router::handle;
use crate::tests::fake_backend::{property, Call, FakeBackend};
use crate::tests::utils::*;
use std::sync::Arc;

fn backend() -> Arc<FakeBackend> {
    Arc::new(
        FakeBackend::new()
            .with_user("u1", "ana@example.com", "secret")
            .with_property(property("p2", "Villa Serena"))
            .with_property(property("p1", "Casa na praia")),
    )
}

#[test]
fn home_lists_properties_by_title() {
    let backend = backend();
    let app = test_app(backend.clone());

    let resp = handle(get("/", None), &app).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    let first = body.find("Casa na praia").unwrap();
    let second = body.find("Villa Serena").unwrap();
    assert!(first < second);
    assert!(body.contains(r#"href="/property/p1""#));
    assert!(body.contains("4.90"));
    assert!(body.contains(r#"href="/auth""#));

    // Signed out: no favorite lookups at all.
    assert_eq!(backend.calls(), vec![Call::ListProperties]);
}

#[test]
fn signed_in_home_flags_saved_properties() {
    let backend = backend();
    backend.seed_favorite("u1", "p2");
    let app = test_app(backend.clone());
    let cookie = session_header(&sign_in_cookie(&app, "ana@example.com", "secret"));

    let body = body_string(handle(get("/", Some(&cookie)), &app).unwrap());

    assert!(body.contains(r#"id="fav-p2""#));
    assert_eq!(body.matches(r#"aria-pressed="true""#).count(), 1);
    assert!(body.contains(r#"href="/profile""#));
    assert_eq!(
        backend.calls().iter().filter(|c| **c == Call::FavoriteIds).count(),
        1
    );
}

#[test]
fn failed_listing_fetch_shows_notice_and_empty_page() {
    let backend = backend();
    backend.fail_property_fetch(true);
    let app = test_app(backend);

    let resp = handle(get("/", None), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Could not load properties."));
    assert!(body.contains("No properties to show right now."));
}

#[test]
fn pending_notice_is_shown_once_then_cleared() {
    let app = test_app(backend());
    let notice = Notice::info("Signed out", Some("See you soon!"));
    let cookie = format!("notice={}", notice.encode());

    let resp = handle(get("/", Some(&cookie)), &app).unwrap();
    assert_eq!(set_cookie_value(&resp, "notice").as_deref(), Some(""));
    assert!(body_string(resp).contains("See you soon!"));
}

#[test]
fn unknown_session_cookie_is_cleared() {
    let app = test_app(backend());

    let resp = handle(get("/", Some("session=not-a-real-token")), &app).unwrap();
    assert_eq!(set_cookie_value(&resp, "session").as_deref(), Some(""));
}

#[test]
fn unknown_route_is_not_found() {
    let app = test_app(backend());
    let result = handle(get("/nowhere", None), &app);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn stylesheet_is_served() {
    let backend = backend();
    let app = test_app(backend.clone());

    let resp = handle(get("/static/main.css", None), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(header(&resp, "Content-Type").unwrap().starts_with("text/css"));
    assert!(backend.calls().is_empty());
}
