use crate::domain::Listing;
use crate::templates::components::favorite_button;
use maud::{html, Markup};

pub fn listing_card(listing: &Listing, return_to: &str) -> Markup {
    let href = listing.href();

    html! {
        article class="listing-card" {
            div class="listing-media" {
                a href=(href) tabindex="-1" {
                    img
                        src=(listing.image_src)
                        alt=(format!("Photo of {}", listing.title))
                        loading="lazy";
                }
                (favorite_button(&listing.id, listing.is_favorite(), return_to))
            }

            a href=(href) class="listing-body" {
                div class="listing-head" {
                    div class="listing-titles" {
                        h2 { (listing.title) }
                        p class="muted" { (listing.subtitle) }
                    }
                    span class="rating" {
                        span aria-hidden="true" { "★" }
                        " "
                        (listing.rating_label())
                    }
                }
                div class="listing-price" {
                    span class="muted" { "From" }
                    strong { (listing.price) }
                }
            }
        }
    }
}
