// src/backend/supabase.rs
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::backend::{
    AuthSession, AuthUser, Backend, BackendError, NewFavorite, NewProfile, Property,
    SignUpOutcome, SignUpRequest,
};

/// Client for a Supabase-style project: auth under `/auth/v1/`,
/// tables under `/rest/v1/`.
pub struct SupabaseClient {
    base: Url,
    anon_key: String,
    client: Client,
}

#[derive(Deserialize)]
struct FavoriteRow {
    property_id: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: String, timeout: Duration) -> Result<Self, BackendError> {
        let mut base =
            Url::parse(base_url).map_err(|e| BackendError::InvalidUrl(format!("{base_url}: {e}")))?;

        // `Url::join` drops the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            base,
            anon_key,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base
            .join(path)
            .map_err(|e| BackendError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Table URL with `column=eq.value` filters plus any raw query pairs.
    fn table_url(
        &self,
        table: &str,
        params: &[(&str, &str)],
        filters: &[(&str, &str)],
    ) -> Result<Url, BackendError> {
        let mut url = self.endpoint(&format!("rest/v1/{table}"))?;
        if !params.is_empty() || !filters.is_empty() {
            let mut q = url.query_pairs_mut();
            for (k, v) in params {
                q.append_pair(k, v);
            }
            for (column, value) in filters {
                q.append_pair(column, &format!("eq.{value}"));
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, access_token: Option<&str>) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token.unwrap_or(self.anon_key.as_str()))
    }

    fn send(&self, rb: RequestBuilder) -> Result<Response, BackendError> {
        let resp = rb
            .send()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().unwrap_or_default();
        let message = error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn send_json<T: DeserializeOwned>(&self, rb: RequestBuilder) -> Result<T, BackendError> {
        self.send(rb)?
            .json::<T>()
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    fn token_grant(&self, grant_type: &str, body: Value) -> Result<AuthSession, BackendError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", grant_type);

        self.send_json(self.request(Method::POST, url, None).json(&body))
    }
}

impl Backend for SupabaseClient {
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        self.token_grant(
            "password",
            json!({ "email": email, "password": password }),
        )
    }

    fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, BackendError> {
        self.token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
    }

    fn sign_up(&self, req: &SignUpRequest<'_>) -> Result<SignUpOutcome, BackendError> {
        let mut url = self.endpoint("auth/v1/signup")?;
        url.query_pairs_mut().append_pair("redirect_to", req.redirect_to);

        let body = json!({
            "email": req.email,
            "password": req.password,
            "data": { "full_name": req.full_name },
        });

        let raw: Value = self.send_json(self.request(Method::POST, url, None).json(&body))?;
        parse_sign_up(raw)
    }

    fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let url = self.endpoint("auth/v1/logout")?;
        self.send(self.request(Method::POST, url, Some(access_token)))?;
        Ok(())
    }

    fn list_properties(&self) -> Result<Vec<Property>, BackendError> {
        let url = self.table_url("properties", &[("select", "*"), ("order", "title.asc")], &[])?;
        self.send_json(self.request(Method::GET, url, None))
    }

    fn fetch_property(&self, id: &str) -> Result<Option<Property>, BackendError> {
        let url = self.table_url(
            "properties",
            &[("select", "*"), ("limit", "1")],
            &[("id", id)],
        )?;
        let rows: Vec<Property> = self.send_json(self.request(Method::GET, url, None))?;
        Ok(rows.into_iter().next())
    }

    fn favorite_exists(
        &self,
        access_token: &str,
        user_id: &str,
        property_id: &str,
    ) -> Result<bool, BackendError> {
        let url = self.table_url(
            "favorites",
            &[("select", "id"), ("limit", "1")],
            &[("user_id", user_id), ("property_id", property_id)],
        )?;
        let rows: Vec<Value> =
            self.send_json(self.request(Method::GET, url, Some(access_token)))?;
        Ok(!rows.is_empty())
    }

    fn favorite_property_ids(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<Vec<String>, BackendError> {
        let url = self.table_url(
            "favorites",
            &[("select", "property_id")],
            &[("user_id", user_id)],
        )?;
        let rows: Vec<FavoriteRow> =
            self.send_json(self.request(Method::GET, url, Some(access_token)))?;
        Ok(rows.into_iter().map(|r| r.property_id).collect())
    }

    fn insert_favorite(
        &self,
        access_token: &str,
        favorite: &NewFavorite<'_>,
    ) -> Result<(), BackendError> {
        let url = self.table_url("favorites", &[], &[])?;
        self.send(
            self.request(Method::POST, url, Some(access_token))
                .header("Prefer", "return=minimal")
                .json(favorite),
        )?;
        Ok(())
    }

    fn delete_favorite(
        &self,
        access_token: &str,
        user_id: &str,
        property_id: &str,
    ) -> Result<(), BackendError> {
        let url = self.table_url(
            "favorites",
            &[],
            &[("user_id", user_id), ("property_id", property_id)],
        )?;
        self.send(self.request(Method::DELETE, url, Some(access_token)))?;
        Ok(())
    }

    fn insert_profile(
        &self,
        access_token: Option<&str>,
        profile: &NewProfile<'_>,
    ) -> Result<(), BackendError> {
        let url = self.table_url("profiles", &[], &[])?;
        self.send(
            self.request(Method::POST, url, access_token)
                .header("Prefer", "return=minimal")
                .json(profile),
        )?;
        Ok(())
    }
}

/// Sign-up returns a full session when confirmation is off, otherwise the
/// bare user (older servers wrap it in `{ "user": ... }`).
fn parse_sign_up(raw: Value) -> Result<SignUpOutcome, BackendError> {
    let decode = |e: serde_json::Error| BackendError::Decode(format!("sign-up response: {e}"));

    if raw.get("access_token").is_some() {
        let session: AuthSession = serde_json::from_value(raw).map_err(decode)?;
        return Ok(SignUpOutcome {
            user: Some(session.user.clone()),
            session: Some(session),
        });
    }

    let user_value = match raw.get("user") {
        Some(u) if u.is_object() => u.clone(),
        _ => raw,
    };

    if user_value.get("id").is_none() {
        return Ok(SignUpOutcome::default());
    }

    let user: AuthUser = serde_json::from_value(user_value).map_err(decode)?;
    Ok(SignUpOutcome {
        user: Some(user),
        session: None,
    })
}

/// Pull a human-readable message out of an auth or table API error body.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(v) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| v.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
