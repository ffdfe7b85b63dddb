//! Canonical record shapes produced by normalization.
//!
//! Optional fields are always present as keys when serialized (`null`), so
//! downstream consumers never have to distinguish "missing" from "absent".

use serde::Serialize;

/// A blog post as shown in listings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: u64,
    pub title: String,
    pub excerpt: String,
    /// Display date, Catalan long form
    pub date: String,
    /// ISO-8601 timestamp with millisecond precision
    pub datetime: String,
    pub slug: String,
    pub featured_image: Option<String>,
}

/// A single blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: u64,
    pub slug: String,
    pub date: String,
    pub datetime: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub featured_alt: Option<String>,
}

/// A singleton CMS page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub content: String,
}

/// Custom fields attached to a provider
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderAttributes {
    /// Category label
    pub tipus: Option<String>,
    /// Location label
    pub ubicacio: Option<String>,
    pub web: Option<String>,
    pub email: Option<String>,
    pub telefon: Option<String>,
    pub descripcion: Option<String>,
}

/// A producer or supplier listed in the directory
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub featured_alt: Option<String>,
    pub acf: ProviderAttributes,
}

impl Provider {
    /// Body to show on the detail page: the custom description when set,
    /// the CMS content otherwise
    pub fn description_html(&self) -> &str {
        self.acf.descripcion.as_deref().unwrap_or(&self.content)
    }
}
