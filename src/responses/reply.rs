// responses/reply.rs
use astra::{Body, ResponseBuilder};
use maud::Markup;

use crate::errors::ServerError;
use crate::notifications::{Notice, NOTICE_COOKIE};
use crate::responses::cookies::{clear_cookie, notice_cookie};
use crate::responses::html::{css_response, html_with_status};
use crate::responses::ResultResp;

#[derive(Debug)]
pub enum Page {
    Html { status: u16, markup: Markup },
    /// htmx swap target, no layout.
    Partial(Markup),
    Redirect(String),
    /// Tell htmx to do a full navigation instead of a swap.
    HxRedirect(String),
    Stylesheet(&'static str),
}

/// What a screen handler decided, before it becomes an HTTP response.
#[derive(Debug)]
pub struct Reply {
    pub page: Page,
    pub flash: Option<Notice>,
    pub cookies: Vec<String>,
}

impl Reply {
    fn new(page: Page) -> Self {
        Self {
            page,
            flash: None,
            cookies: Vec::new(),
        }
    }

    pub fn html(markup: Markup) -> Self {
        Self::html_status(200, markup)
    }

    pub fn html_status(status: u16, markup: Markup) -> Self {
        Self::new(Page::Html { status, markup })
    }

    pub fn partial(markup: Markup) -> Self {
        Self::new(Page::Partial(markup))
    }

    pub fn redirect(to: impl Into<String>) -> Self {
        Self::new(Page::Redirect(to.into()))
    }

    pub fn hx_redirect(to: impl Into<String>) -> Self {
        Self::new(Page::HxRedirect(to.into()))
    }

    pub fn stylesheet(css: &'static str) -> Self {
        Self::new(Page::Stylesheet(css))
    }

    /// Notice to show on the page this reply leads to.
    pub fn with_flash(mut self, notice: Notice) -> Self {
        self.flash = Some(notice);
        self
    }

    pub fn with_cookie(mut self, cookie: String) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// `notice_shown` is true when the request carried a notice cookie that the
    /// rendered page displayed; it is cleared so it shows once.
    pub fn into_response(self, notice_shown: bool, secure: bool) -> ResultResp {
        let renders = matches!(self.page, Page::Html { .. } | Page::Partial(_));

        let mut cookies = self.cookies;
        match &self.flash {
            Some(notice) => cookies.push(notice_cookie(notice, secure)),
            None if notice_shown && renders => cookies.push(clear_cookie(NOTICE_COOKIE, secure)),
            None => {}
        }

        match self.page {
            Page::Html { status, markup } => html_with_status(status, markup, &cookies),
            Page::Partial(markup) => html_with_status(200, markup, &cookies),
            Page::Redirect(to) => redirect_response(303, "Location", &to, &cookies),
            Page::HxRedirect(to) => redirect_response(200, "HX-Redirect", &to, &cookies),
            Page::Stylesheet(css) => css_response(css),
        }
    }
}

fn redirect_response(status: u16, header: &str, to: &str, cookies: &[String]) -> ResultResp {
    let mut builder = ResponseBuilder::new().status(status).header(header, to);
    for c in cookies {
        builder = builder.header("Set-Cookie", c.as_str());
    }
    builder
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
