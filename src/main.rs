use crate::app::App;
use crate::backend::{AuthEvents, Subscription, SupabaseClient};
use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::domain::profiles::ProfileReconciler;
use crate::responses::html_error_response;
use crate::router::handle;
use astra::Server;
use std::sync::Arc;
use std::thread;

mod app;
mod auth;
mod backend;
mod clock;
mod config;
mod db;
mod domain;
mod errors;
mod handlers;
mod notifications;
mod requests;
mod responses;
mod router;
mod routes;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.database_path.clone());
    if let Err(e) = init_db(&db, &config.schema_path) {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let client = match SupabaseClient::new(
        &config.backend_url,
        config.backend_anon_key.clone(),
        config.backend_timeout,
    ) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "backend client setup failed");
            std::process::exit(1);
        }
    };
    let backend = Arc::new(client);

    let events = AuthEvents::new();
    spawn_audit_log(events.subscribe());
    ProfileReconciler::new(db.clone(), backend.clone(), config.reconcile_interval)
        .spawn(events.subscribe());

    let app = App::new(db, backend, events, &config.site_url);

    tracing::info!(
        addr = %config.bind_addr,
        site_url = %app.site_url,
        workers = config.max_workers,
        "starting server"
    );

    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down");
}

/// One log line per sign-in, sign-out and token refresh.
fn spawn_audit_log(subscription: Subscription) {
    thread::spawn(move || {
        while let Some(change) = subscription.recv() {
            tracing::info!(event = ?change.event, user_id = %change.user_id, "auth state changed");
        }
    });
}
