use crate::backend::Property;
use crate::routes;

/// Summary shown on a listing card. Built per render, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub rating: f64,
    /// Already formatted for display, e.g. "R$ 320".
    pub price: String,
    pub image_src: String,
    pub is_favorite: Option<bool>,
}

impl Listing {
    pub fn from_property(p: &Property, is_favorite: Option<bool>) -> Self {
        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            subtitle: p.city.clone(),
            rating: p.rating,
            price: format_price(p.price_per_night),
            image_src: p.image_url.clone(),
            is_favorite,
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite.unwrap_or(false)
    }

    pub fn rating_label(&self) -> String {
        format_rating(self.rating)
    }

    pub fn href(&self) -> String {
        routes::property_path(&self.id)
    }
}

/// Nightly price, whole units.
pub fn format_price(amount: f64) -> String {
    format!("R$ {amount:.0}")
}

pub fn format_rating(rating: f64) -> String {
    format!("{rating:.2}")
}
