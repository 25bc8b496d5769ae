//! # Quill Shared
//!
//! Form bodies and query strings exchanged between browser and server.

pub mod dto;

pub use dto::{LoginForm, NextQuery, PageQuery, PostForm, RegisterForm};
