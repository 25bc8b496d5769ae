use maud::{Markup, html};

use quill_core::domain::CurrentUser;

use super::layout;

/// Title of the about page.
pub const ABOUT_TITLE: &str = "About";

pub fn about(viewer: Option<&CurrentUser>) -> Markup {
    layout::page(
        Some(ABOUT_TITLE),
        viewer,
        html! {
            div class="content-section" {
                h1 { (ABOUT_TITLE) }
                p {
                    "Quill is a small blog. Anyone can read every post; "
                    "signed-in authors can write posts and edit or delete their own."
                }
            }
        },
    )
}
