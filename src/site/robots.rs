//! Crawler directives (`/robots.txt`).

use crate::config::SiteConfig;

/// Path prefixes no crawler should visit
pub const DISALLOWED_PREFIXES: &[&str] = &["/api/", "/_next/", "/admin/"];

pub fn render_robots(config: &SiteConfig) -> String {
    let mut out = String::new();

    out.push_str("User-agent: *\nAllow: /\n");
    for prefix in DISALLOWED_PREFIXES {
        out.push_str(&format!("Disallow: {}\n", prefix));
    }

    out.push_str("\nUser-agent: Googlebot\nAllow: /\nCrawl-delay: 0\n");

    out.push_str(&format!("\nHost: {}\n", config.site_url));
    out.push_str(&format!("Sitemap: {}\n", config.absolute_url("/sitemap.xml")));
    out
}
