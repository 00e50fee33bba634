// src/domain/favorites.rs
//
// One toggle shared by the listing card and the property detail screen.
// The flag a screen shows only changes after the backend confirmed the write.

use std::collections::HashSet;

use crate::auth::provider::CurrentUser;
use crate::backend::{Backend, BackendError, NewFavorite};

#[derive(Debug)]
pub enum ToggleOutcome {
    /// No session: nothing was sent to the backend.
    SignInRequired,
    Toggled { is_favorite: bool },
    /// The write failed; the flag keeps its previous value.
    Failed {
        is_favorite: bool,
        error: BackendError,
    },
}

/// Flip membership of `property_id` in the user's remote favorites set.
/// Returns the new state once the backend has accepted the write.
pub fn toggle_membership(
    backend: &dyn Backend,
    user: &CurrentUser,
    property_id: &str,
    currently: bool,
) -> Result<bool, BackendError> {
    if currently {
        backend.delete_favorite(&user.access_token, &user.id, property_id)?;
        return Ok(false);
    }

    let favorite = NewFavorite {
        user_id: &user.id,
        property_id,
    };
    match backend.insert_favorite(&user.access_token, &favorite) {
        Ok(()) => Ok(true),
        // Already saved elsewhere; the remote set now agrees with the request.
        Err(e) if e.is_conflict() => Ok(true),
        Err(e) => Err(e),
    }
}

pub fn toggle_favorite(
    backend: &dyn Backend,
    user: Option<&CurrentUser>,
    property_id: &str,
    currently: bool,
) -> ToggleOutcome {
    let Some(user) = user else {
        return ToggleOutcome::SignInRequired;
    };

    match toggle_membership(backend, user, property_id, currently) {
        Ok(is_favorite) => ToggleOutcome::Toggled { is_favorite },
        Err(error) => {
            tracing::warn!(user_id = %user.id, property_id, error = %error, "favorite toggle failed");
            ToggleOutcome::Failed {
                is_favorite: currently,
                error,
            }
        }
    }
}

/// Whether the signed-in user saved this property. A failed check reads as
/// "not saved".
pub fn is_favorite(backend: &dyn Backend, user: Option<&CurrentUser>, property_id: &str) -> bool {
    let Some(user) = user else {
        return false;
    };

    backend
        .favorite_exists(&user.access_token, &user.id, property_id)
        .unwrap_or_else(|e| {
            tracing::warn!(user_id = %user.id, property_id, error = %e, "favorite check failed");
            false
        })
}

/// All saved property ids, for flagging a page of cards in one call.
pub fn favorite_ids(backend: &dyn Backend, user: Option<&CurrentUser>) -> HashSet<String> {
    let Some(user) = user else {
        return HashSet::new();
    };

    match backend.favorite_property_ids(&user.access_token, &user.id) {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            tracing::warn!(user_id = %user.id, error = %e, "favorite list failed");
            HashSet::new()
        }
    }
}
