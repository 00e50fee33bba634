use super::Ctx;
use crate::auth::provider::{AuthError, AuthState};
use crate::notifications::Notice;
use crate::responses::Reply;
use crate::routes;
use crate::templates::pages::{profile_loading_page, profile_page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    Loading,
    RedirectToAuth,
    Show {
        email: Option<String>,
        initials: String,
    },
}

/// Redirect only once the session is known to be absent.
pub fn profile_view(state: &AuthState) -> ProfileView {
    match state {
        AuthState::Loading => ProfileView::Loading,
        AuthState::SignedOut => ProfileView::RedirectToAuth,
        AuthState::SignedIn(user) => ProfileView::Show {
            email: user.email.clone(),
            initials: initials(user.email.as_deref()),
        },
    }
}

/// First two characters of the email's local part, upper-cased. "U" otherwise.
pub fn initials(email: Option<&str>) -> String {
    let local = email
        .and_then(|e| e.split('@').next())
        .unwrap_or("");
    let out: String = local.chars().take(2).collect::<String>().to_uppercase();
    if out.is_empty() {
        "U".to_string()
    } else {
        out
    }
}

pub fn show(ctx: &Ctx<'_>) -> Reply {
    match profile_view(ctx.session.state()) {
        ProfileView::Loading => Reply::html(profile_loading_page(ctx.chrome())),
        ProfileView::RedirectToAuth => Reply::redirect(routes::AUTH),
        ProfileView::Show { email, initials } => {
            Reply::html(profile_page(ctx.chrome(), email.as_deref(), &initials))
        }
    }
}

/// `POST /profile/sign-out`. A failure keeps the visitor on the profile screen.
pub fn sign_out(ctx: &mut Ctx<'_>) -> Reply {
    match ctx.session.sign_out(ctx.now) {
        Ok(()) => Reply::redirect(routes::HOME)
            .with_flash(Notice::info("Signed out", Some("See you soon!"))),
        Err(AuthError::NotSignedIn) => Reply::redirect(routes::AUTH),
        Err(e) => {
            tracing::warn!(error = %e, "sign-out failed");
            ctx.show(Notice::error("Sign-out failed", e.user_message()));
            show(ctx)
        }
    }
}
