use std::collections::HashMap;

use super::Ctx;
use crate::auth::provider::AuthError;
use crate::notifications::Notice;
use crate::responses::cookies::session_cookie;
use crate::responses::Reply;
use crate::routes;
use crate::templates::pages::{auth_page, AuthForm, AuthMode};

fn field(form: &HashMap<String, String>, name: &str) -> String {
    form.get(name).cloned().unwrap_or_default()
}

/// `GET /auth`, `?mode=register` opens the registration form.
pub fn show(ctx: &Ctx<'_>, query: &HashMap<String, String>) -> Reply {
    let form = AuthForm {
        mode: AuthMode::parse(query.get("mode").map(String::as_str)),
        ..AuthForm::default()
    };
    Reply::html(auth_page(ctx.chrome(), &form))
}

/// `POST /auth`. `intent=switch` flips the mode and echoes every field back.
pub fn submit(ctx: &mut Ctx<'_>, input: &HashMap<String, String>) -> Reply {
    let mut form = AuthForm {
        mode: AuthMode::parse(input.get("mode").map(String::as_str)),
        email: field(input, "email"),
        password: field(input, "password"),
        full_name: field(input, "full_name"),
    };

    if input.get("intent").map(String::as_str) == Some("switch") {
        form.mode = form.mode.toggled();
        return Reply::html(auth_page(ctx.chrome(), &form));
    }

    match form.mode {
        AuthMode::Login => match ctx.session.sign_in(&form.email, &form.password, ctx.now) {
            Ok(raw_token) => Reply::redirect(routes::HOME)
                .with_cookie(session_cookie(&raw_token, ctx.app.secure_cookies()))
                .with_flash(Notice::info("Signed in", Some("Welcome back"))),
            Err(e) => {
                log_auth_error("sign-in", &e);
                ctx.show(Notice::error("Sign-in failed", e.user_message()));
                Reply::html(auth_page(ctx.chrome(), &form))
            }
        },
        AuthMode::Register => {
            let result = if form.full_name.trim().is_empty() {
                Err(AuthError::Invalid("Full name is required.".into()))
            } else {
                let redirect_to = ctx.app.sign_up_redirect();
                ctx.session.sign_up(
                    &form.email,
                    &form.password,
                    Some(&form.full_name),
                    &redirect_to,
                    ctx.now,
                )
            };

            match result {
                Ok(res) => {
                    tracing::debug!(user_id = ?res.user_id, profile = ?res.profile, "sign-up finished");
                    ctx.show(Notice::info("Account created", Some("You can sign in now")));
                    form.mode = AuthMode::Login;
                }
                Err(e) => {
                    log_auth_error("sign-up", &e);
                    ctx.show(Notice::error("Could not create account", e.user_message()));
                }
            }
            Reply::html(auth_page(ctx.chrome(), &form))
        }
    }
}

fn log_auth_error(action: &str, e: &AuthError) {
    match e {
        AuthError::Local(inner) => tracing::error!(action, error = %inner, "auth request failed locally"),
        AuthError::Backend(inner) => tracing::info!(action, error = %inner, "auth rejected by backend"),
        AuthError::Invalid(_) | AuthError::NotSignedIn => {}
    }
}
