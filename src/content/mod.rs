//! Content client for the WordPress backend
//!
//! Translates the site's read intents (page by slug, latest posts, post by
//! slug, providers, slug enumeration) into REST queries, serves them through
//! the response cache and normalizes every payload into one stable record
//! shape per entity type. Raw backend JSON never leaves this module.
//!
//! ## Backends
//!
//! - [`HttpBackend`]: reqwest against the live `wp-json/wp/v2` API
//! - [`MockBackend`]: canned responses for tests and local previews

pub mod backend;
pub mod client;
pub mod dates;
pub mod mock;
pub mod normalize;
pub mod records;

pub use backend::{ContentBackend, HttpBackend};
pub use client::{ContentClient, PAGES, POSTS, PROVIDERS};
pub use dates::PostDate;
pub use mock::MockBackend;
pub use records::{Page, PostDetail, PostSummary, Provider, ProviderAttributes};
