use crate::routes;
use crate::templates::{app_layout, Chrome};
use maud::{html, Markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("register") => AuthMode::Register,
            _ => AuthMode::Login,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuthMode::Login => "login",
            AuthMode::Register => "register",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

/// What the visitor has typed so far. Switching modes keeps every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

pub fn auth_page(chrome: Chrome<'_>, form: &AuthForm) -> Markup {
    let register = form.mode == AuthMode::Register;
    let (heading, lead, submit, switch) = if register {
        (
            "Create account",
            "Fill in your details to create an account",
            "Create account",
            "Already have an account? Sign in",
        )
    } else {
        (
            "Sign in",
            "Enter your credentials",
            "Sign in",
            "No account yet? Create one",
        )
    };

    app_layout(
        heading,
        chrome,
        html! {
            main class="container narrow" {
                section class="card auth-card" {
                    h1 { (heading) }
                    p class="muted" { (lead) }

                    form method="post" action=(routes::AUTH) class="stack" {
                        input type="hidden" name="mode" value=(form.mode.as_str());

                        @if register {
                            label for="full_name" { "Full name" }
                            input
                                id="full_name"
                                name="full_name"
                                type="text"
                                placeholder="Your name"
                                value=(form.full_name)
                                required;
                        } @else {
                            // Kept so switching back does not lose it.
                            input type="hidden" name="full_name" value=(form.full_name);
                        }

                        label for="email" { "Email" }
                        input
                            id="email"
                            name="email"
                            type="email"
                            placeholder="you@example.com"
                            value=(form.email)
                            required;

                        label for="password" { "Password" }
                        input
                            id="password"
                            name="password"
                            type="password"
                            placeholder="••••••••"
                            value=(form.password)
                            required;

                        button type="submit" name="intent" value="submit" class="btn btn-block" { (submit) }

                        button
                            type="submit"
                            name="intent"
                            value="switch"
                            class="link-button"
                            formnovalidate
                        { (switch) }
                    }
                }
            }
        },
    )
}
