use crate::notifications::Notice;
use maud::{html, Markup};

pub const TOASTS_ID: &str = "toasts";

/// Toast region. `oob` marks it for an htmx out-of-band swap so a fragment
/// response can update it next to its main target.
pub fn toasts(notice: Option<&Notice>, oob: bool) -> Markup {
    html! {
        div id=(TOASTS_ID) class="toasts" aria-live="polite" hx-swap-oob=[oob.then_some("true")] {
            @if let Some(n) = notice {
                (toast(n))
            }
        }
    }
}

fn toast(n: &Notice) -> Markup {
    html! {
        div.toast.toast-destructive[n.is_destructive()] role="status" {
            strong class="toast-title" { (n.title) }
            @if let Some(desc) = &n.description {
                p class="toast-description" { (desc) }
            }
        }
    }
}
