//! REST API client for the murmur backend.
//!
//! This crate provides:
//! - A typed client over the remote posts/comments/users endpoints
//! - Normalization of transport and server failures into [`ApiError`]
//! - Client-side validation that rejects bad input before any request
//! - The [`TokenSource`] seam through which the session credential is
//!   attached to authenticated requests

mod client;
mod error;
mod models;
mod token;
pub mod validation;

pub use client::{ApiClient, FEED_PAGE_LIMIT};
pub use error::{ApiError, ApiResult};
pub use models::{Comment, ImageUpload, NewAccount, NewPost, Post, PostUpdate, User};
pub use token::TokenSource;
pub use validation::ValidationError;
