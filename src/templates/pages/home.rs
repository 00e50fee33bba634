// templates/pages/home.rs

use crate::domain::Listing;
use crate::routes;
use crate::templates::{app_layout, components::listing_card, Chrome};
use maud::{html, Markup};

pub fn home_page(chrome: Chrome<'_>, listings: &[Listing]) -> Markup {
    app_layout(
        "Explore",
        chrome,
        html! {
            main class="container" {
                h1 { "Places to stay" }

                @if listings.is_empty() {
                    p class="muted empty" { "No properties to show right now." }
                } @else {
                    section class="listing-grid" {
                        @for listing in listings {
                            (listing_card(listing, routes::HOME))
                        }
                    }
                }
            }
        },
    )
}
