//! Page shell shared by every view.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use quill_core::domain::CurrentUser;

const SITE_NAME: &str = "Quill Blog";

const SITE_CSS: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;background:#fafafa;color:#333;line-height:1.6}
a{color:#5f788a;text-decoration:none}
a:hover{color:#cbd5db}
.site-header{background:#5f788a;padding:.6rem 1rem}
.site-header nav{max-width:860px;margin:0 auto;display:flex;gap:1rem;align-items:center}
.site-header a,.site-header span,.site-header button{color:#cbd5db;font-size:.95rem}
.site-header .brand{font-weight:700;color:#fff;margin-right:1rem}
.nav-right{margin-left:auto;display:flex;gap:1rem;align-items:center}
.inline{display:inline;margin:0}
.inline button{background:none;border:none;cursor:pointer;padding:0}
main{max-width:860px;margin:1.5rem auto;padding:0 1rem}
.content-section{background:#fff;padding:1rem 1.25rem;border:1px solid #ddd;border-radius:4px;margin-bottom:1.25rem}
.article-metadata{padding-bottom:.2rem;margin-bottom:.5rem;border-bottom:1px solid #e3e3e3;font-size:.9rem}
.article-metadata small{color:#888;margin-left:.5rem}
.article-title{color:#444;font-size:1.5rem;margin:.25rem 0}
.article-content{white-space:pre-wrap}
.pagination a{display:inline-block;margin:0 .2rem 1rem;padding:.2rem .6rem;border:1px solid #5f788a;border-radius:4px}
.pagination a.current{background:#5f788a;color:#fff}
.errors{color:#a33;padding-left:1.2rem}
label{display:block;margin-top:.75rem;font-weight:600}
input[type=text],input[type=email],input[type=password],textarea{width:100%;padding:.4rem;border:1px solid #ccc;border-radius:4px;font:inherit}
textarea{min-height:12rem}
.btn{margin-top:1rem;padding:.4rem 1rem;border:1px solid #5f788a;border-radius:4px;background:#fff;color:#5f788a;cursor:pointer;font:inherit}
.btn-danger{border-color:#c33;color:#c33}
.muted{color:#888}
"#;

/// Full HTML document around `body`; the navigation reflects `viewer`.
pub fn page(title: Option<&str>, viewer: Option<&CurrentUser>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title {
                    @if let Some(title) = title {
                        (SITE_NAME) " - " (title)
                    } @else {
                        (SITE_NAME)
                    }
                }
                style { (PreEscaped(SITE_CSS)) }
            }
            body {
                header class="site-header" {
                    nav {
                        a class="brand" href="/" { (SITE_NAME) }
                        a href="/" { "Home" }
                        a href="/about" { "About" }
                        div class="nav-right" {
                            @if let Some(user) = viewer {
                                a href="/post/new" { "New Post" }
                                a href={ "/user/" (user.username) } { (user.username) }
                                form class="inline" method="post" action="/logout" {
                                    button type="submit" { "Logout" }
                                }
                            } @else {
                                a href="/login" { "Login" }
                                a href="/register" { "Register" }
                            }
                        }
                    }
                }
                main { (body) }
            }
        }
    }
}

/// Bulleted list of form errors; renders nothing when there are none.
pub fn error_list(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="errors" {
                @for error in errors {
                    li { (error) }
                }
            }
        }
    }
}
