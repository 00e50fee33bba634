use crate::errors::ServerError;
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

#[test]
fn detail_page_shows_full_property() {
    let backend = backend();
    let app = test_app(backend.clone());

    let resp = handle(get("/property/p1", None), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Casa na praia"));
    assert!(body.contains("Florianópolis"));
    assert!(body.contains("6 guests"));
    assert!(body.contains("3 bedrooms"));
    assert!(body.contains("2 bathrooms"));
    assert!(body.contains("Wi-Fi"));
    assert!(body.contains("R$ 350"));
    assert!(body.contains("/ night"));
    assert!(body.contains("disabled"));

    // No session, so no favorite check.
    assert_eq!(backend.calls(), vec![Call::FetchProperty("p1".into())]);
}

#[test]
fn signed_in_detail_checks_favorite() {
    let backend = backend();
    backend.seed_favorite("u1", "p1");
    let app = test_app(backend.clone());
    let cookie = session_header(&sign_in_cookie(&app, "ana@example.com", "secret"));

    let body = body_string(handle(get("/property/p1", Some(&cookie)), &app).unwrap());

    assert!(body.contains(r#"aria-pressed="true""#));
    assert!(body.contains(r#"name="return_to" value="/property/p1""#));
    assert!(backend.calls().contains(&Call::FavoriteExists("p1".into())));
}

#[test]
fn failed_favorite_check_reads_as_not_saved() {
    let backend = backend();
    backend.seed_favorite("u1", "p1");
    backend.fail_reads(true);
    let app = test_app(backend);
    let cookie = session_header(&sign_in_cookie(&app, "ana@example.com", "secret"));

    let resp = handle(get("/property/p1", Some(&cookie)), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains(r#"aria-pressed="false""#));
}

#[test]
fn missing_property_renders_not_found_without_notice() {
    let app = test_app(backend());

    let resp = handle(get("/property/does-not-exist", None), &app).unwrap();
    assert_eq!(resp.status(), 404);

    let body = body_string(resp);
    assert!(body.contains("Property not found"));
    assert!(!body.contains("toast-title"));
}

#[test]
fn fetch_error_renders_not_found_with_notice() {
    let backend = backend();
    backend.fail_property_fetch(true);
    let app = test_app(backend);

    let resp = handle(get("/property/p1", None), &app).unwrap();
    assert_eq!(resp.status(), 502);

    let body = body_string(resp);
    assert!(body.contains("Property not found"));
    assert!(body.contains("Could not load the property details."));
}

#[test]
fn malformed_id_is_not_a_route() {
    let app = test_app(backend());
    let result = handle(get("/property/p1%3Cscript%3E", None), &app);
    assert!(matches!(result, Err(ServerError::NotFound)));
}
