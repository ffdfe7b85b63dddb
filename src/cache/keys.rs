//! Query keys for backend reads
//!
//! A `QueryKey` names one collection read against the REST API and renders
//! both the request URL and the cache storage key from the same parts, so
//! the two can never disagree.

use std::fmt;

/// One read against a backend collection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Collection name (`posts`, `pages`, `proveedores`)
    pub collection: String,
    /// Query parameters in insertion order; values are stored unencoded
    pub params: Vec<(String, String)>,
    /// Whether related resources (featured media) are inlined
    pub embed: bool,
}

impl QueryKey {
    /// Create a key for a collection with no parameters
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            params: Vec::new(),
            embed: false,
        }
    }

    /// Add a query parameter
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    /// Ask the backend to inline featured media
    pub fn embed(mut self) -> Self {
        self.embed = true;
        self
    }

    /// Filter by slug
    pub fn slug(self, slug: &str) -> Self {
        self.param("slug", slug)
    }

    /// Limit the page size
    pub fn per_page(self, per_page: u32) -> Self {
        self.param("per_page", per_page)
    }

    /// Only return the `slug` field of each record
    pub fn slugs_only(self) -> Self {
        self.param("_fields", "slug")
    }

    /// Render the request URL below an API root such as `https://wp/wp-json/wp/v2`
    pub fn to_url(&self, api_url: &str) -> String {
        let mut query: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        if self.embed {
            query.push("_embed".to_string());
        }

        if query.is_empty() {
            format!("{}/{}", api_url, self.collection)
        } else {
            format!("{}/{}?{}", api_url, self.collection, query.join("&"))
        }
    }

    /// Convert to storage key string
    /// Format: collection?query (the URL without the API root)
    pub fn to_storage_key(&self) -> String {
        self.to_url("").trim_start_matches('/').to_string()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_storage_key())
    }
}
