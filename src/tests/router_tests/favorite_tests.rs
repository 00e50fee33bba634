use crate::notifications::Notice;
use crate::router::handle;
use crate::tests::fake_backend::{property, Call, FakeBackend};
use crate::tests::utils::*;
use std::sync::Arc;

fn backend() -> Arc<FakeBackend> {
    Arc::new(
        FakeBackend::new()
            .with_user("u1", "ana@example.com", "secret")
            .with_property(property("p1", "Casa na praia")),
    )
}

fn writes(backend: &FakeBackend) -> usize {
    backend
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::InsertFavorite(_) | Call::DeleteFavorite(_)))
        .count()
}

#[test]
fn signed_out_toggle_redirects_to_auth_without_writing() {
    let backend = backend();
    let app = test_app(backend.clone());

    let form = "favorite=false&return_to=%2Fproperty%2Fp1";
    let resp = handle(post_form("/property/p1/favorite", form, None, false), &app).unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location").as_deref(), Some("/auth"));
    let notice = Notice::decode(&set_cookie_value(&resp, "notice").unwrap()).unwrap();
    assert_eq!(notice.title, "Login required");
    assert!(notice.is_destructive());
    assert!(backend.calls().is_empty());
}

#[test]
fn signed_out_htmx_toggle_gets_hx_redirect() {
    let backend = backend();
    let app = test_app(backend.clone());

    let resp = handle(post_form("/property/p1/favorite", "favorite=false", None, true), &app).unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "HX-Redirect").as_deref(), Some("/auth"));
    assert_eq!(writes(&backend), 0);
}

#[test]
fn toggle_inserts_then_deletes() {
    let backend = backend();
    let app = test_app(backend.clone());
    let cookie = session_header(&sign_in_cookie(&app, "ana@example.com", "secret"));

    let form = "favorite=false&return_to=%2Fproperty%2Fp1";
    let resp = handle(post_form("/property/p1/favorite", form, Some(&cookie), false), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location").as_deref(), Some("/property/p1"));
    assert!(backend.has_favorite("u1", "p1"));
    assert_eq!(writes(&backend), 1);

    let form = "favorite=true&return_to=%2Fproperty%2Fp1";
    let resp = handle(post_form("/property/p1/favorite", form, Some(&cookie), false), &app).unwrap();
    let notice = Notice::decode(&set_cookie_value(&resp, "notice").unwrap()).unwrap();
    assert_eq!(notice.title, "Removed from favorites");
    assert!(!backend.has_favorite("u1", "p1"));
    assert_eq!(writes(&backend), 2);
}

#[test]
fn htmx_toggle_returns_button_fragment() {
    let backend = backend();
    let app = test_app(backend.clone());
    let cookie = session_header(&sign_in_cookie(&app, "ana@example.com", "secret"));

    let form = "favorite=false&return_to=%2F";
    let resp = handle(post_form("/property/p1/favorite", form, Some(&cookie), true), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(!body.contains("<!DOCTYPE html>"));
    assert!(body.contains(r#"id="fav-p1""#));
    assert!(body.contains(r#"aria-pressed="true""#));
    assert!(body.contains(r#"hx-swap-oob="true""#));
    assert!(body.contains("Added to favorites"));
}

#[test]
fn failed_write_keeps_flag_and_reports() {
    let backend = backend();
    backend.fail_writes(true);
    let app = test_app(backend.clone());
    let cookie = session_header(&sign_in_cookie(&app, "ana@example.com", "secret"));

    let resp = handle(
        post_form("/property/p1/favorite", "favorite=false", Some(&cookie), true),
        &app,
    )
    .unwrap();

    let body = body_string(resp);
    assert!(body.contains(r#"aria-pressed="false""#));
    assert!(body.contains("toast-destructive"));
    assert!(body.contains("Could not update favorites"));
    assert!(!backend.has_favorite("u1", "p1"));
}

#[test]
fn offsite_return_to_falls_back_home() {
    let app = test_app(backend());
    let cookie = session_header(&sign_in_cookie(&app, "ana@example.com", "secret"));

    let form = "favorite=false&return_to=https%3A%2F%2Fevil.example.com";
    let resp = handle(post_form("/property/p1/favorite", form, Some(&cookie), false), &app).unwrap();
    assert_eq!(header(&resp, "Location").as_deref(), Some("/"));
}
