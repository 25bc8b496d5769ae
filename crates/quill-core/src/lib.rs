//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! Entities, pagination rules, the ownership policy and the post service live
//! here; storage and identity are reached only through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use pagination::{Page, PageSelector};
pub use service::{ListingConfig, PostService};
