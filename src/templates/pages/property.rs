use crate::backend::Property;
use crate::domain::listing::{format_price, format_rating};
use crate::routes;
use crate::templates::{app_layout, components::favorite_button, Chrome};
use maud::{html, Markup};

pub fn property_page(chrome: Chrome<'_>, property: &Property, is_favorite: bool) -> Markup {
    let here = routes::property_path(&property.id);

    app_layout(
        &property.title,
        chrome,
        html! {
            main class="property" {
                div class="property-hero" {
                    img src=(property.image_url) alt=(property.title);
                    a href=(routes::HOME) class="hero-button hero-back" aria-label="Back" { "←" }
                    div class="hero-favorite" {
                        (favorite_button(&property.id, is_favorite, &here))
                    }
                }

                div class="container" {
                    header class="property-head" {
                        h1 { (property.title) }
                        div class="muted property-meta" {
                            span class="rating" {
                                span aria-hidden="true" { "★" }
                                " "
                                (format_rating(property.rating))
                            }
                            span { "•" }
                            span { (property.city) }
                        }
                    }

                    ul class="property-facts" {
                        li { (property.guests) " guests" }
                        li { (property.bedrooms) " bedrooms" }
                        li { (property.bathrooms) " bathrooms" }
                    }

                    section class="property-description" {
                        p class="muted" { (property.description) }
                    }

                    @if !property.amenities.is_empty() {
                        section {
                            h2 { "Amenities" }
                            div class="badges" {
                                @for amenity in &property.amenities {
                                    span class="badge" { (amenity) }
                                }
                            }
                        }
                    }

                    div class="booking-bar" {
                        div {
                            strong class="price" { (format_price(property.price_per_night)) }
                            span class="muted" { " / night" }
                        }
                        // Booking is not wired to anything yet.
                        button type="button" class="btn" disabled { "Reserve" }
                    }
                }
            }
        },
    )
}

pub fn property_not_found_page(chrome: Chrome<'_>) -> Markup {
    app_layout(
        "Property not found",
        chrome,
        html! {
            main class="container narrow center not-found" {
                p class="muted" { "Property not found" }
                a href=(routes::HOME) class="btn" { "Back" }
            }
        },
    )
}
