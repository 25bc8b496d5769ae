//! Application services - the listing, detail and mutation components.

mod guard;
mod posts;

pub use guard::{ensure_author, require_login};
pub use posts::{AuthorListing, ListingConfig, PostService};
