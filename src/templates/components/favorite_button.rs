use crate::routes;
use maud::{html, Markup};

pub fn favorite_dom_id(property_id: &str) -> String {
    format!("fav-{property_id}")
}

/// Heart toggle. Works as a plain form post; with htmx it swaps itself.
///
/// `favorite` carries the flag the visitor is looking at, so the server flips
/// what was shown rather than guessing.
pub fn favorite_button(property_id: &str, is_favorite: bool, return_to: &str) -> Markup {
    let action = routes::favorite_path(property_id);
    let flag = if is_favorite { "true" } else { "false" };
    let label = if is_favorite {
        "Remove from favorites"
    } else {
        "Add to favorites"
    };

    html! {
        form
            id=(favorite_dom_id(property_id))
            class="favorite-form"
            method="post"
            action=(action)
            hx-post=(action)
            hx-swap="outerHTML"
        {
            input type="hidden" name="favorite" value=(flag);
            input type="hidden" name="return_to" value=(return_to);
            button.heart.heart-on[is_favorite]
                type="submit"
                aria-pressed=(flag)
                aria-label=(label)
                title=(label)
            {
                svg
                    xmlns="http://www.w3.org/2000/svg"
                    width="18"
                    height="18"
                    viewBox="0 0 24 24"
                    fill=(if is_favorite { "currentColor" } else { "none" })
                    stroke="currentColor"
                    stroke-width="1.8"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                {
                    path d="M19.5 12.572l-7.5 7.428l-7.5 -7.428a5 5 0 1 1 7.5 -6.566a5 5 0 1 1 7.5 6.572" {}
                }
            }
        }
    }
}
