//! Outbound page surface
//!
//! The fixed route table, the crawler directives and site index documents,
//! and the HTML views rendered from normalized records.

pub mod html;
pub mod robots;
pub mod sitemap;

pub use robots::render_robots;
pub use sitemap::{render_sitemap, site_index, ChangeFrequency, SitemapEntry};

use sitemap::ChangeFrequency::{Daily, Monthly, Weekly};

/// A fixed route of the site
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticRoute {
    pub path: &'static str,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Every fixed route, in the order the site index lists them
pub const STATIC_ROUTES: &[StaticRoute] = &[
    StaticRoute { path: "/", change_frequency: Daily, priority: 1.0 },
    StaticRoute { path: "/blog", change_frequency: Daily, priority: 0.9 },
    StaticRoute { path: "/proveidors", change_frequency: Weekly, priority: 0.8 },
    StaticRoute { path: "/qui-som", change_frequency: Monthly, priority: 0.7 },
    StaticRoute { path: "/fer-se-soci", change_frequency: Monthly, priority: 0.7 },
    StaticRoute { path: "/comunitat", change_frequency: Weekly, priority: 0.6 },
];

/// Prefix of post detail routes
pub const BLOG_PREFIX: &str = "/blog/";
/// Prefix of provider detail routes
pub const PROVIDERS_PREFIX: &str = "/proveidors/";

/// CMS page rendered in the home hero
pub const HOME_PAGE_SLUG: &str = "la-igualitaria";
/// CMS page rendered on the about route
pub const ABOUT_PAGE_SLUG: &str = "qui-som";

/// Site name used in titles
pub const SITE_NAME: &str = "La Igualitària";
