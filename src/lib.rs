//! La Igualitària - content site server
//!
//! Server-rendered pages for the Poble-sec consumer cooperative. Content is
//! read from a headless WordPress backend through a cached, normalizing
//! client; the provider directory adds in-memory search and category
//! filtering on top.

pub mod cache;
pub mod config;
pub mod content;
pub mod directory;
pub mod routes;
pub mod server;
pub mod services;
pub mod site;
pub mod types;

pub use config::{Args, SiteConfig};
pub use server::{run, AppState};
pub use types::{Result, SiteError};
