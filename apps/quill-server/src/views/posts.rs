//! Listing, detail, form and delete-confirmation pages.

use chrono::{DateTime, Utc};
use maud::{Markup, html};

use quill_core::Page;
use quill_core::domain::{CurrentUser, PostDraft, PostWithAuthor, TITLE_MAX_CHARS};
use quill_core::service::AuthorListing;

use super::layout::{self, error_list};

/// How many page links to show on each side of the current page.
const PAGE_LINK_SPREAD: u64 = 3;

fn posted_on(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn post_url(post: &PostWithAuthor) -> String {
    format!("/post/{}", post.post.id)
}

fn article_metadata(post: &PostWithAuthor) -> Markup {
    html! {
        div class="article-metadata" {
            a href={ "/user/" (post.author.username) } { (post.author.username) }
            small { (posted_on(&post.post.date_posted)) }
        }
    }
}

fn summary(post: &PostWithAuthor) -> Markup {
    html! {
        article class="content-section" {
            (article_metadata(post))
            h2 { a class="article-title" href=(post_url(post)) { (post.post.title) } }
            p class="article-content" { (post.post.content) }
        }
    }
}

fn pagination(page: &Page<PostWithAuthor>, base: &str) -> Markup {
    let link = |n: u64| format!("{base}?page={n}");
    let low = page.number.saturating_sub(PAGE_LINK_SPREAD).max(1);
    let high = (page.number + PAGE_LINK_SPREAD).min(page.num_pages);

    html! {
        @if page.has_other_pages() {
            nav class="pagination" {
                @if let Some(previous) = page.previous_page_number() {
                    a href=(link(1)) { "First" }
                    a href=(link(previous)) { "Previous" }
                }
                @for n in low..=high {
                    @if n == page.number {
                        a class="current" href=(link(n)) { (n) }
                    } @else {
                        a href=(link(n)) { (n) }
                    }
                }
                @if let Some(next) = page.next_page_number() {
                    a href=(link(next)) { "Next" }
                    a href=(link(page.num_pages)) { "Last" }
                }
            }
        }
    }
}

fn listing(page: &Page<PostWithAuthor>, base: &str) -> Markup {
    html! {
        @if page.is_empty() {
            p class="muted" { "No posts yet." }
        }
        @for post in &page.items {
            (summary(post))
        }
        (pagination(page, base))
    }
}

/// Home page: every post, newest first.
pub fn home(viewer: Option<&CurrentUser>, page: &Page<PostWithAuthor>) -> Markup {
    layout::page(None, viewer, listing(page, "/"))
}

/// One author's posts.
pub fn author_posts(viewer: Option<&CurrentUser>, listing_page: &AuthorListing) -> Markup {
    let username = &listing_page.author.username;
    let base = format!("/user/{username}");
    let heading = format!(
        "Posts by {} ({})",
        username, listing_page.posts.total_items
    );

    layout::page(
        Some(username.as_str()),
        viewer,
        html! {
            h1 { (heading) }
            (listing(&listing_page.posts, &base))
        },
    )
}

/// Single post, with edit links for its author.
pub fn detail(viewer: Option<&CurrentUser>, post: &PostWithAuthor) -> Markup {
    let is_author = viewer.is_some_and(|user| user.is_author_of(&post.post));
    let url = post_url(post);

    layout::page(
        Some(post.post.title.as_str()),
        viewer,
        html! {
            article class="content-section" {
                (article_metadata(post))
                @if is_author {
                    div {
                        a href={ (url) "/update" } { "Update" }
                        " · "
                        a href={ (url) "/delete" } { "Delete" }
                    }
                }
                h1 class="article-title" { (post.post.title) }
                p class="article-content" { (post.post.content) }
            }
        },
    )
}

/// Create/update form. `action` is where the form posts to.
pub fn form(
    viewer: Option<&CurrentUser>,
    legend: &str,
    action: &str,
    draft: &PostDraft,
    errors: &[String],
) -> Markup {
    layout::page(
        Some(legend),
        viewer,
        html! {
            div class="content-section" {
                form method="post" action=(action) {
                    fieldset {
                        legend { (legend) }
                        (error_list(errors))
                        label for="title" { "Title" }
                        input type="text" id="title" name="title" maxlength=(TITLE_MAX_CHARS)
                            required value=(draft.title);
                        label for="content" { "Content" }
                        textarea id="content" name="content" required { (draft.content) }
                    }
                    button class="btn" type="submit" { "Post" }
                }
            }
        },
    )
}

/// "Are you sure?" page in front of a delete.
pub fn confirm_delete(viewer: Option<&CurrentUser>, post: &PostWithAuthor) -> Markup {
    let url = post_url(post);

    layout::page(
        Some("Delete Post"),
        viewer,
        html! {
            div class="content-section" {
                form method="post" action={ (url) "/delete" } {
                    fieldset {
                        legend { "Delete Post" }
                        p { "Are you sure you want to delete the post \"" (post.post.title) "\"?" }
                    }
                    button class="btn btn-danger" type="submit" { "Yes, Delete" }
                    " "
                    a class="btn" href=(url) { "Cancel" }
                }
            }
        },
    )
}
