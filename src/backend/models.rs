// src/backend/models.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Used when the auth API omits both `expires_at` and `expires_in`.
pub const DEFAULT_ACCESS_TTL_SECS: i64 = 60 * 60;

/// Identity as returned by the hosted auth API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

impl AuthUser {
    pub fn full_name(&self) -> Option<&str> {
        self.user_metadata
            .get("full_name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Credentials returned by a password or refresh grant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl AuthSession {
    /// Unix time at which the access token stops being accepted.
    pub fn access_expires_at(&self, now: i64) -> i64 {
        self.expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs))
            .unwrap_or(now + DEFAULT_ACCESS_TTL_SECS)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: Option<&'a str>,
    /// Where the confirmation email sends the user back to.
    pub redirect_to: &'a str,
}

/// Sign-up answers with a user, and with a session too when email
/// confirmation is disabled on the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignUpOutcome {
    pub user: Option<AuthUser>,
    pub session: Option<AuthSession>,
}

/// Row of the remote `properties` collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    pub price_per_night: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bedrooms: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bathrooms: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub guests: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct NewFavorite<'a> {
    pub user_id: &'a str,
    pub property_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NewProfile<'a> {
    pub id: &'a str,
    pub full_name: &'a str,
}

// Table columns are nullable; treat SQL null like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
