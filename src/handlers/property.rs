use super::Ctx;
use crate::domain::favorites::is_favorite;
use crate::notifications::Notice;
use crate::responses::Reply;
use crate::templates::pages::{property_not_found_page, property_page};

/// Detail screen. The favorite check only runs for a signed-in visitor.
pub fn show(ctx: &mut Ctx<'_>, id: &str) -> Reply {
    let app = ctx.app;
    let backend = app.backend.as_ref();

    match backend.fetch_property(id) {
        Ok(Some(property)) => {
            let saved = is_favorite(backend, ctx.user(), &property.id);
            Reply::html(property_page(ctx.chrome(), &property, saved))
        }
        Ok(None) => Reply::html_status(404, property_not_found_page(ctx.chrome())),
        Err(e) => {
            tracing::error!(property_id = id, error = %e, "property fetch failed");
            ctx.show(Notice::error(
                "Error",
                "Could not load the property details.",
            ));
            Reply::html_status(502, property_not_found_page(ctx.chrome()))
        }
    }
}
