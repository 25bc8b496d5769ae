//! Login, sign-up and logged-out pages.

use maud::{Markup, html};

use quill_core::domain::CurrentUser;
use quill_shared::RegisterForm;

use super::layout::{self, error_list};

pub fn login(viewer: Option<&CurrentUser>, action: &str, username: &str, errors: &[String]) -> Markup {
    layout::page(
        Some("Login"),
        viewer,
        html! {
            div class="content-section" {
                form method="post" action=(action) {
                    fieldset {
                        legend { "Log In" }
                        (error_list(errors))
                        label for="username" { "Username" }
                        input type="text" id="username" name="username" required value=(username);
                        label for="password" { "Password" }
                        input type="password" id="password" name="password" required;
                    }
                    button class="btn" type="submit" { "Login" }
                }
                p class="muted" {
                    "Need an account? " a href="/register" { "Sign up now" }
                }
            }
        },
    )
}

pub fn register(viewer: Option<&CurrentUser>, form: &RegisterForm, errors: &[String]) -> Markup {
    layout::page(
        Some("Register"),
        viewer,
        html! {
            div class="content-section" {
                form method="post" action="/register" {
                    fieldset {
                        legend { "Join Today" }
                        (error_list(errors))
                        label for="username" { "Username" }
                        input type="text" id="username" name="username" required value=(form.username);
                        label for="email" { "Email" }
                        input type="email" id="email" name="email" required value=(form.email);
                        label for="password" { "Password" }
                        input type="password" id="password" name="password" required;
                        label for="password_confirm" { "Password confirmation" }
                        input type="password" id="password_confirm" name="password_confirm" required;
                    }
                    button class="btn" type="submit" { "Sign Up" }
                }
                p class="muted" {
                    "Already have an account? " a href="/login" { "Sign in" }
                }
            }
        },
    )
}

pub fn logged_out() -> Markup {
    layout::page(
        Some("Logged out"),
        None,
        html! {
            div class="content-section" {
                h2 { "You have been logged out" }
                p { a href="/login" { "Log in again" } }
            }
        },
    )
}
