//! Thin client for the hosted auth + data service.
//!
//! Every call is one blocking request/response. Nothing here retries,
//! batches or caches; callers decide what a failure means for the screen.

pub mod events;
pub mod models;
pub mod supabase;

pub use events::{AuthChangeEvent, AuthEvents, AuthStateChange, Subscription};
pub use models::{
    AuthSession, AuthUser, NewFavorite, NewProfile, Property, SignUpOutcome, SignUpRequest,
};
pub use supabase::SupabaseClient;

#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),
    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The token was rejected (expired, revoked or never valid).
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Unique-key violation, e.g. a profile row that already exists.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// Text suitable for a notification. API errors carry the backend's own
    /// message; transport problems get a generic one.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Api { message, .. } => message.clone(),
            BackendError::Network(_) => "Could not reach the server. Please try again.".into(),
            BackendError::Decode(_) | BackendError::InvalidUrl(_) => {
                "Unexpected response from the server.".into()
            }
        }
    }
}

/// Operations the screens need from the hosted service.
///
/// `access_token` arguments scope the call to the signed-in user; table rules
/// on the backend decide what that user may read or write.
pub trait Backend: Send + Sync {
    fn sign_in_with_password(&self, email: &str, password: &str)
        -> Result<AuthSession, BackendError>;

    fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, BackendError>;

    fn sign_up(&self, req: &SignUpRequest<'_>) -> Result<SignUpOutcome, BackendError>;

    fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;

    fn list_properties(&self) -> Result<Vec<Property>, BackendError>;

    /// `Ok(None)` when no row has this id.
    fn fetch_property(&self, id: &str) -> Result<Option<Property>, BackendError>;

    fn favorite_exists(
        &self,
        access_token: &str,
        user_id: &str,
        property_id: &str,
    ) -> Result<bool, BackendError>;

    fn favorite_property_ids(
        &self,
        access_token: &str,
        user_id: &str,
    ) -> Result<Vec<String>, BackendError>;

    fn insert_favorite(
        &self,
        access_token: &str,
        favorite: &NewFavorite<'_>,
    ) -> Result<(), BackendError>;

    fn delete_favorite(
        &self,
        access_token: &str,
        user_id: &str,
        property_id: &str,
    ) -> Result<(), BackendError>;

    /// Without a token the request goes out with the anonymous key only.
    fn insert_profile(
        &self,
        access_token: Option<&str>,
        profile: &NewProfile<'_>,
    ) -> Result<(), BackendError>;
}
