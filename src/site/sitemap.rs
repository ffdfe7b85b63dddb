//! Site index (`/sitemap.xml`).
//!
//! Lists every fixed route plus every known post and provider, each with a
//! last-modified timestamp and a change-frequency hint.

use chrono::{DateTime, SecondsFormat, Utc};

use super::html::escape;
use super::{BLOG_PREFIX, PROVIDERS_PREFIX, STATIC_ROUTES};
use crate::config::SiteConfig;
use crate::content::dates::parse_backend_date;
use crate::content::PostSummary;
use crate::types::Result;

/// Number of latest posts listed in the site index
pub const SITEMAP_POSTS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Build the index entries. Posts carry their own timestamp; fixed routes
/// and providers are stamped with `now`.
pub fn site_index(
    config: &SiteConfig,
    posts: &[PostSummary],
    provider_slugs: &[String],
    now: DateTime<Utc>,
) -> Result<Vec<SitemapEntry>> {
    let mut entries: Vec<SitemapEntry> = STATIC_ROUTES
        .iter()
        .map(|route| SitemapEntry {
            url: config.absolute_url(route.path),
            last_modified: now,
            change_frequency: route.change_frequency,
            priority: route.priority,
        })
        .collect();

    for post in posts {
        entries.push(SitemapEntry {
            url: config.absolute_url(&format!("{}{}", BLOG_PREFIX, post.slug)),
            last_modified: parse_backend_date(&post.datetime)?,
            change_frequency: ChangeFrequency::Weekly,
            priority: 0.8,
        });
    }

    entries.extend(provider_slugs.iter().map(|slug| SitemapEntry {
        url: config.absolute_url(&format!("{}{}", PROVIDERS_PREFIX, slug)),
        last_modified: now,
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.7,
    }));

    Ok(entries)
}

/// Serialize entries as a sitemaps.org urlset
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        out.push_str(&format!(
            "<url>\n<loc>{}</loc>\n<lastmod>{}</lastmod>\n<changefreq>{}</changefreq>\n<priority>{:.1}</priority>\n</url>\n",
            escape(&entry.url),
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Millis, true),
            entry.change_frequency.as_str(),
            entry.priority,
        ));
    }
    out.push_str("</urlset>\n");
    out
}
