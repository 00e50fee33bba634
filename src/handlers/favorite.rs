use std::collections::HashMap;

use maud::html;

use super::Ctx;
use crate::domain::{toggle_favorite, ToggleOutcome};
use crate::notifications::Notice;
use crate::responses::Reply;
use crate::routes::{self, safe_return_to};
use crate::templates::components::favorite_button;
use crate::templates::components::notice::toasts;

/// `POST /property/:id/favorite`
pub fn toggle(ctx: &mut Ctx<'_>, property_id: &str, form: &HashMap<String, String>) -> Reply {
    let currently = form.get("favorite").is_some_and(|v| v == "true");
    let return_to = safe_return_to(form.get("return_to").map(String::as_str));

    let outcome = toggle_favorite(ctx.app.backend.as_ref(), ctx.user(), property_id, currently);

    let (is_favorite, notice) = match outcome {
        ToggleOutcome::SignInRequired => {
            let notice = Notice::error("Login required", "Sign in to save favorites.");
            let reply = if ctx.htmx {
                Reply::hx_redirect(routes::AUTH)
            } else {
                Reply::redirect(routes::AUTH)
            };
            return reply.with_flash(notice);
        }
        ToggleOutcome::Toggled { is_favorite: true } => (true, Notice::info("Added to favorites", None)),
        ToggleOutcome::Toggled { is_favorite: false } => {
            (false, Notice::info("Removed from favorites", None))
        }
        ToggleOutcome::Failed { is_favorite, error } => (
            is_favorite,
            Notice::error("Could not update favorites", error.user_message()),
        ),
    };

    if ctx.htmx {
        return Reply::partial(html! {
            (favorite_button(property_id, is_favorite, &return_to))
            (toasts(Some(&notice), true))
        });
    }

    Reply::redirect(return_to).with_flash(notice)
}
