use super::Ctx;
use crate::domain::favorites::favorite_ids;
use crate::domain::Listing;
use crate::notifications::Notice;
use crate::responses::Reply;
use crate::templates::pages::home_page;

pub fn show(ctx: &mut Ctx<'_>) -> Reply {
    let app = ctx.app;
    let backend = app.backend.as_ref();

    let listings: Vec<Listing> = match backend.list_properties() {
        Ok(properties) => {
            let user = ctx.user();
            let saved = favorite_ids(backend, user);
            properties
                .iter()
                .map(|p| Listing::from_property(p, user.map(|_| saved.contains(&p.id))))
                .collect()
        }
        Err(e) => {
            tracing::error!(error = %e, "property list fetch failed");
            ctx.show(Notice::error("Error", "Could not load properties."));
            Vec::new()
        }
    };

    Reply::html(home_page(ctx.chrome(), &listings))
}
