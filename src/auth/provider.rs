// src/auth/provider.rs
use crate::auth::sessions::{self, StoredSession};
use crate::backend::{
    AuthChangeEvent, AuthEvents, AuthSession, AuthStateChange, Backend, BackendError,
    SignUpRequest,
};
use crate::db::Database;
use crate::domain::profiles::{self, ProfileStatus};
use crate::errors::ServerError;

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: String,
    pub email: Option<String>,
    pub access_token: String,
    session_id: i64,
}

impl CurrentUser {
    fn from_stored(s: StoredSession) -> Self {
        Self {
            id: s.user_id,
            email: s.email,
            access_token: s.access_token,
            session_id: s.id,
        }
    }

    #[cfg(test)]
    pub fn for_tests(id: &str) -> Self {
        Self {
            id: id.to_string(),
            email: Some(format!("{id}@example.com")),
            access_token: format!("access-{id}"),
            session_id: 0,
        }
    }
}

/// Loading until [`SessionProvider::load`] has looked at the cookie.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Loading,
    SignedOut,
    SignedIn(CurrentUser),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Invalid(String),
    #[error("not signed in")]
    NotSignedIn,
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Local(#[from] ServerError),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Invalid(msg) => msg.clone(),
            AuthError::NotSignedIn => "You are not signed in.".into(),
            AuthError::Backend(e) => e.user_message(),
            AuthError::Local(_) => "Something went wrong. Please try again.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignUpResult {
    pub user_id: Option<String>,
    pub profile: ProfileStatus,
}

/// Per-request view of who is signed in, plus the sign-in/up/out operations.
///
/// State changes are broadcast on `events` so background work (profile
/// reconciliation, audit logging) can react.
pub struct SessionProvider<'a> {
    db: &'a Database,
    backend: &'a dyn Backend,
    events: &'a AuthEvents,
    state: AuthState,
    refresh_deferred: bool,
}

impl<'a> SessionProvider<'a> {
    pub fn new(db: &'a Database, backend: &'a dyn Backend, events: &'a AuthEvents) -> Self {
        Self {
            db,
            backend,
            events,
            state: AuthState::Loading,
            refresh_deferred: false,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        match &self.state {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    /// Signed out for this request only: the refresh failed for a transient
    /// reason and the session row was kept for the next request.
    pub fn refresh_deferred(&self) -> bool {
        self.refresh_deferred
    }

    /// Resolve the cookie token into a session, refreshing an expired access
    /// token on the way.
    pub fn load(&mut self, cookie_token: Option<&str>, now: i64) -> Result<&AuthState, ServerError> {
        self.state = AuthState::SignedOut;
        self.refresh_deferred = false;

        let Some(raw) = cookie_token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(&self.state);
        };

        let Some(stored) = self
            .db
            .with_conn(|conn| sessions::load_session(conn, raw, now))?
        else {
            return Ok(&self.state);
        };

        if !stored.access_expired(now) {
            self.state = AuthState::SignedIn(CurrentUser::from_stored(stored));
            return Ok(&self.state);
        }

        match self.backend.refresh_session(&stored.refresh_token) {
            Ok(fresh) => {
                self.db
                    .with_conn(|conn| sessions::store_refreshed(conn, stored.id, &fresh, now))?;
                tracing::debug!(user_id = %stored.user_id, "access token refreshed");

                let user = CurrentUser {
                    id: stored.user_id.clone(),
                    email: fresh.user.email.clone().or(stored.email),
                    access_token: fresh.access_token.clone(),
                    session_id: stored.id,
                };
                self.emit(AuthChangeEvent::TokenRefreshed, &user.id, Some(fresh));
                self.state = AuthState::SignedIn(user);
            }
            Err(e) if e.is_auth_rejection() || e.status() == Some(400) => {
                tracing::info!(user_id = %stored.user_id, error = %e, "refresh rejected, ending session");
                self.db
                    .with_conn(|conn| sessions::revoke_session(conn, stored.id, now))?;
                self.emit(AuthChangeEvent::SignedOut, &stored.user_id, None);
            }
            Err(e) => {
                tracing::warn!(user_id = %stored.user_id, error = %e, "token refresh failed, keeping session");
                self.refresh_deferred = true;
            }
        }

        Ok(&self.state)
    }

    /// Returns the raw cookie token for the new local session.
    pub fn sign_in(&mut self, email: &str, password: &str, now: i64) -> Result<String, AuthError> {
        let email = normalize_email(email)?;
        require_password(password)?;

        let session = self.backend.sign_in_with_password(&email, password)?;
        let raw = self
            .db
            .with_conn(|conn| sessions::create_session(conn, &session, now))?;
        let stored = self
            .db
            .with_conn(|conn| sessions::load_session(conn, &raw, now))?
            .ok_or(ServerError::InternalError)?;

        tracing::info!(user_id = %session.user.id, "signed in");
        let user = CurrentUser::from_stored(stored);
        self.emit(AuthChangeEvent::SignedIn, &user.id, Some(session));
        self.state = AuthState::SignedIn(user);

        Ok(raw)
    }

    /// Create the account, then its profile row. A failed profile insert is
    /// queued for the reconciler instead of failing the sign-up.
    pub fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
        redirect_to: &str,
        now: i64,
    ) -> Result<SignUpResult, AuthError> {
        let email = normalize_email(email)?;
        require_password(password)?;
        let full_name = full_name.map(str::trim).filter(|n| !n.is_empty());

        let outcome = self.backend.sign_up(&SignUpRequest {
            email: &email,
            password,
            full_name,
            redirect_to,
        })?;

        let Some(user) = outcome.user else {
            tracing::warn!("sign-up returned no user");
            return Ok(SignUpResult {
                user_id: None,
                profile: ProfileStatus::NoUser,
            });
        };

        tracing::info!(user_id = %user.id, "account created");

        let token = outcome.session.as_ref().map(|s| s.access_token.as_str());
        let name = full_name.or_else(|| user.full_name()).unwrap_or("");
        let profile =
            profiles::create_or_queue(self.db, self.backend, &user.id, name, token, now)?;

        Ok(SignUpResult {
            user_id: Some(user.id),
            profile,
        })
    }

    /// Remote sign-out, then local revoke. A token the backend already
    /// considers dead counts as signed out.
    pub fn sign_out(&mut self, now: i64) -> Result<(), AuthError> {
        let Some(user) = self.user().cloned() else {
            return Err(AuthError::NotSignedIn);
        };

        match self.backend.sign_out(&user.access_token) {
            Ok(()) => {}
            Err(e) if e.is_auth_rejection() => {
                tracing::debug!(user_id = %user.id, error = %e, "token already invalid at sign-out");
            }
            Err(e) => return Err(e.into()),
        }

        self.db
            .with_conn(|conn| sessions::revoke_session(conn, user.session_id, now))?;

        tracing::info!(user_id = %user.id, "signed out");
        self.emit(AuthChangeEvent::SignedOut, &user.id, None);
        self.state = AuthState::SignedOut;
        Ok(())
    }

    fn emit(&self, event: AuthChangeEvent, user_id: &str, session: Option<AuthSession>) {
        self.events.emit(AuthStateChange {
            event,
            user_id: user_id.to_string(),
            session,
        });
    }
}

/// Trim + lowercase. Format checks are left to the backend.
pub fn normalize_email(email: &str) -> Result<String, AuthError> {
    let e = email.trim().to_lowercase();
    if e.is_empty() {
        return Err(AuthError::Invalid("Email is required.".into()));
    }
    Ok(e)
}

fn require_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::Invalid("Password is required.".into()));
    }
    Ok(())
}
