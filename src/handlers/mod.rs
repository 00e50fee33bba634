//! One module per screen. Handlers return a [`Reply`](crate::responses::Reply);
//! the router turns it into a response.

pub mod auth;
pub mod favorite;
pub mod home;
pub mod profile;
pub mod property;

use crate::app::App;
use crate::auth::provider::{CurrentUser, SessionProvider};
use crate::notifications::Notice;
use crate::templates::Chrome;

/// Everything a handler knows about the request it is serving.
pub struct Ctx<'a> {
    pub app: &'a App,
    pub session: SessionProvider<'a>,
    /// Notice rendered on this response's page, if it renders one.
    pub notice: Option<Notice>,
    pub htmx: bool,
    pub now: i64,
}

impl<'a> Ctx<'a> {
    pub fn user(&self) -> Option<&CurrentUser> {
        self.session.user()
    }

    pub fn chrome(&self) -> Chrome<'_> {
        Chrome {
            signed_in: self.user().is_some(),
            notice: self.notice.as_ref(),
        }
    }

    /// Show `notice` on the page this request renders.
    pub fn show(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}
