// src/domain/profiles.rs
//
// Account creation and profile creation are two separate backend calls.
// When the second one fails, the profile is parked in `pending_profiles`
// and retried on the user's next sign-in and by a periodic sweep.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::auth::sessions;
use crate::backend::{AuthChangeEvent, AuthStateChange, Backend, NewProfile, Subscription};
use crate::clock::now_unix;
use crate::db::{pending_profiles, Database};
use crate::errors::ServerError;

const SWEEP_BATCH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStatus {
    Created,
    Queued,
    /// Sign-up succeeded without returning a user, so there is nothing to create.
    NoUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    NothingPending,
    Created,
    StillPending,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub created: usize,
    pub still_pending: usize,
    /// Rows skipped because of a local error; they stay queued.
    pub failed: usize,
    pub sessions_purged: usize,
}

/// Insert the profile row, or queue it when the backend refuses.
pub fn create_or_queue(
    db: &Database,
    backend: &dyn Backend,
    user_id: &str,
    full_name: &str,
    access_token: Option<&str>,
    now: i64,
) -> Result<ProfileStatus, ServerError> {
    let profile = NewProfile {
        id: user_id,
        full_name,
    };

    match backend.insert_profile(access_token, &profile) {
        Ok(()) => Ok(ProfileStatus::Created),
        Err(e) if e.is_conflict() => Ok(ProfileStatus::Created),
        Err(e) => {
            tracing::warn!(user_id, error = %e, "profile creation failed, queued for retry");
            db.with_conn(|conn| {
                pending_profiles::enqueue(conn, user_id, full_name, &e.to_string(), now)
            })?;
            Ok(ProfileStatus::Queued)
        }
    }
}

/// Retry a queued profile for one user.
pub fn retry_pending(
    db: &Database,
    backend: &dyn Backend,
    user_id: &str,
    access_token: Option<&str>,
    now: i64,
) -> Result<RetryOutcome, ServerError> {
    let Some(pending) = db.with_conn(|conn| pending_profiles::find(conn, user_id))? else {
        return Ok(RetryOutcome::NothingPending);
    };

    let profile = NewProfile {
        id: &pending.user_id,
        full_name: &pending.full_name,
    };

    match backend.insert_profile(access_token, &profile) {
        Ok(()) => {
            db.with_conn(|conn| pending_profiles::remove(conn, user_id))?;
            tracing::info!(user_id, attempts = pending.attempts + 1, "queued profile created");
            Ok(RetryOutcome::Created)
        }
        Err(e) if e.is_conflict() => {
            db.with_conn(|conn| pending_profiles::remove(conn, user_id))?;
            tracing::info!(user_id, "queued profile already existed");
            Ok(RetryOutcome::Created)
        }
        Err(e) => {
            db.with_conn(|conn| {
                pending_profiles::record_failure(conn, user_id, &e.to_string(), now)
            })?;
            tracing::warn!(user_id, attempts = pending.attempts + 1, error = %e, "profile retry failed");
            Ok(RetryOutcome::StillPending)
        }
    }
}

/// Background worker that drains `pending_profiles`.
pub struct ProfileReconciler {
    db: Database,
    backend: Arc<dyn Backend>,
    interval: Duration,
}

impl ProfileReconciler {
    pub fn new(db: Database, backend: Arc<dyn Backend>, interval: Duration) -> Self {
        Self {
            db,
            backend,
            interval,
        }
    }

    /// A fresh session is the best moment to retry: we hold a valid token.
    pub fn handle_change(
        &self,
        change: &AuthStateChange,
        now: i64,
    ) -> Result<RetryOutcome, ServerError> {
        match (&change.event, &change.session) {
            (AuthChangeEvent::SignedIn | AuthChangeEvent::TokenRefreshed, Some(session)) => {
                retry_pending(
                    &self.db,
                    self.backend.as_ref(),
                    &change.user_id,
                    Some(&session.access_token),
                    now,
                )
            }
            _ => Ok(RetryOutcome::NothingPending),
        }
    }

    /// Retry the oldest queued profiles, using a live session token when the
    /// user has one, and clear out dead browser sessions.
    pub fn sweep(&self, now: i64) -> Result<SweepReport, ServerError> {
        let mut report = SweepReport::default();
        let batch = self
            .db
            .with_conn(|conn| pending_profiles::list_oldest(conn, SWEEP_BATCH))?;

        for pending in batch {
            let outcome = self
                .db
                .with_conn(|conn| sessions::live_access_token(conn, &pending.user_id, now))
                .and_then(|token| {
                    retry_pending(
                        &self.db,
                        self.backend.as_ref(),
                        &pending.user_id,
                        token.as_deref(),
                        now,
                    )
                });

            match outcome {
                Ok(RetryOutcome::Created) => report.created += 1,
                Ok(RetryOutcome::StillPending) => report.still_pending += 1,
                Ok(RetryOutcome::NothingPending) => {}
                Err(e) => {
                    tracing::error!(user_id = %pending.user_id, error = %e, "pending profile retry failed");
                    report.failed += 1;
                }
            }
        }

        report.sessions_purged = self
            .db
            .with_conn(|conn| sessions::purge_dead_sessions(conn, now))?;

        Ok(report)
    }

    /// Run until every [`crate::backend::AuthEvents`] handle is dropped.
    pub fn spawn(self, subscription: Subscription) -> JoinHandle<()> {
        thread::spawn(move || {
            tracing::info!(interval_secs = self.interval.as_secs(), "profile reconciler started");
            let mut next_sweep = Instant::now() + self.interval;

            loop {
                let wait = next_sweep.saturating_duration_since(Instant::now());
                match subscription.recv_timeout(wait) {
                    Ok(Some(change)) => {
                        if let Err(e) = self.handle_change(&change, now_unix()) {
                            tracing::error!(user_id = %change.user_id, error = %e, "reconcile on auth change failed");
                        }
                    }
                    Ok(None) => {
                        match self.sweep(now_unix()) {
                            Ok(report) if report != SweepReport::default() => {
                                tracing::info!(
                                    created = report.created,
                                    still_pending = report.still_pending,
                                    failed = report.failed,
                                    sessions_purged = report.sessions_purged,
                                    "reconcile sweep"
                                );
                            }
                            Ok(_) => {}
                            Err(e) => tracing::error!(error = %e, "reconcile sweep failed"),
                        }
                        next_sweep = Instant::now() + self.interval;
                    }
                    Err(()) => break,
                }
            }

            tracing::info!("profile reconciler stopped");
        })
    }
}
