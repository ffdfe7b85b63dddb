//! Provider directory
//!
//! In-memory search and single-category filtering over the provider list,
//! plus the loading/ready/errored state of one directory session. Filtering
//! never touches the network; it is recomputed from the full list on every
//! change of query or category.

pub mod filter;
pub mod session;

pub use filter::{
    derive_categories, filter_providers, matches_category, matches_search, Category,
    CategoryFilter, ALL_CATEGORY_ID, ALL_CATEGORY_NAME,
};
pub use session::{DirectorySession, DirectoryState, Listing};

/// Number of providers fetched for the directory listing
pub const DIRECTORY_PAGE_SIZE: u32 = 50;
