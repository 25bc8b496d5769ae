use actix_web::http::StatusCode;
use maud::{Markup, html};

use super::layout;

/// Error page for `status`. Rendered without a viewer: error responses are
/// built after the request's identity is out of reach.
pub fn error_page(status: StatusCode, detail: &str) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");
    let heading = format!("{} {}", status.as_u16(), reason);

    layout::page(
        Some(reason),
        None,
        html! {
            div class="content-section" {
                h1 { (heading) }
                p { (detail) }
                p { a href="/" { "Back to the home page" } }
            }
        },
    )
}
