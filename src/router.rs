use crate::app::App;
use crate::auth::provider::SessionProvider;
use crate::auth::sessions::SESSION_COOKIE;
use crate::clock::now_unix;
use crate::errors::ServerError;
use crate::handlers::{self, Ctx};
use crate::notifications::{Notice, NOTICE_COOKIE};
use crate::requests::{cookie, is_htmx, parse_query, read_form};
use crate::responses::cookies::clear_cookie;
use crate::responses::{Reply, ResultResp};
use crate::routes::{Route, STYLESHEET};
use astra::Request;

const MAIN_CSS: &str = include_str!("../static/main.css");

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let secure = app.secure_cookies();

    // Static assets skip the session lookup.
    if method == "GET" && path == STYLESHEET {
        return Reply::stylesheet(MAIN_CSS).into_response(false, secure);
    }
    let route = Route::parse(&method, &path).ok_or(ServerError::NotFound)?;

    let raw_notice = cookie(&req, NOTICE_COOKIE);
    let session_token = cookie(&req, SESSION_COOKIE);
    let now = now_unix();

    let mut session = SessionProvider::new(&app.db, app.backend.as_ref(), &app.events);
    session.load(session_token.as_deref(), now)?;

    let mut ctx = Ctx {
        app,
        session,
        notice: raw_notice.as_deref().and_then(Notice::decode),
        htmx: is_htmx(&req),
        now,
    };

    let mut reply = match route {
        Route::Home => handlers::home::show(&mut ctx),
        Route::AuthPage => handlers::auth::show(&ctx, &parse_query(&req)),
        Route::AuthSubmit => {
            let form = read_form(&mut req)?;
            handlers::auth::submit(&mut ctx, &form)
        }
        Route::Profile => handlers::profile::show(&ctx),
        Route::SignOut => handlers::profile::sign_out(&mut ctx),
        Route::Property(id) => handlers::property::show(&mut ctx, id),
        Route::ToggleFavorite(id) => {
            let form = read_form(&mut req)?;
            handlers::favorite::toggle(&mut ctx, id, &form)
        }
    };

    // Cookie points at a session that is gone (signed out, revoked, expired).
    if session_token.is_some() && ctx.user().is_none() && !ctx.session.refresh_deferred() {
        reply = reply.with_cookie(clear_cookie(SESSION_COOKIE, secure));
    }

    reply.into_response(raw_notice.is_some(), secure)
}
