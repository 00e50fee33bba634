// src/routes.rs
//! Named navigation targets and request-line parsing.

pub const HOME: &str = "/";
pub const AUTH: &str = "/auth";
pub const PROFILE: &str = "/profile";
pub const SIGN_OUT: &str = "/profile/sign-out";
pub const STYLESHEET: &str = "/static/main.css";

pub fn property_path(id: &str) -> String {
    format!("/property/{id}")
}

pub fn favorite_path(id: &str) -> String {
    format!("/property/{id}/favorite")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Home,
    AuthPage,
    AuthSubmit,
    Profile,
    SignOut,
    Property(&'a str),
    ToggleFavorite(&'a str),
}

impl<'a> Route<'a> {
    pub fn parse(method: &str, path: &'a str) -> Option<Route<'a>> {
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match (method, path) {
            ("GET", HOME) => return Some(Route::Home),
            ("GET", AUTH) => return Some(Route::AuthPage),
            ("POST", AUTH) => return Some(Route::AuthSubmit),
            ("GET", PROFILE) => return Some(Route::Profile),
            ("POST", SIGN_OUT) => return Some(Route::SignOut),
            _ => {}
        }

        let rest = path.strip_prefix("/property/")?;
        match (method, rest.split_once('/')) {
            ("GET", None) if is_valid_id(rest) => Some(Route::Property(rest)),
            ("POST", Some((id, "favorite"))) if is_valid_id(id) => {
                Some(Route::ToggleFavorite(id))
            }
            _ => None,
        }
    }
}

/// Record ids are UUIDs or slugs; anything else is not a route.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Only same-site absolute paths are followed after a form post.
pub fn safe_return_to(candidate: Option<&str>) -> String {
    match candidate {
        Some(p) if p.starts_with('/') && !p.starts_with("//") && !p.contains('\\') => p.to_string(),
        _ => HOME.to_string(),
    }
}
