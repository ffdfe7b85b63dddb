//! Search predicate, category facets and the combined filter.

use serde::Serialize;

use crate::content::Provider;

/// Identifier of the synthetic "no filter" facet
pub const ALL_CATEGORY_ID: &str = "all";
/// Display name of the synthetic "no filter" facet
pub const ALL_CATEGORY_NAME: &str = "Tots";

/// A facet offered as a filter option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    fn all() -> Self {
        Self {
            id: ALL_CATEGORY_ID.to_string(),
            name: ALL_CATEGORY_NAME.to_string(),
        }
    }
}

/// The selected facet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive `tipus`
    Tipus(String),
}

impl CategoryFilter {
    /// Parse a `categoria` query value; missing, empty and `all` select everything
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None => Self::All,
            Some(v) if v.is_empty() || v == ALL_CATEGORY_ID => Self::All,
            Some(v) => Self::Tipus(v.to_string()),
        }
    }

    /// Facet id this filter corresponds to
    pub fn id(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORY_ID,
            Self::Tipus(t) => t,
        }
    }
}

/// Facets for a provider list: "all" first, then each distinct non-empty
/// `tipus` in first-seen order
pub fn derive_categories(providers: &[Provider]) -> Vec<Category> {
    let mut categories = vec![Category::all()];
    for tipus in providers
        .iter()
        .filter_map(|p| p.acf.tipus.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        if !categories.iter().any(|c| c.id == tipus) {
            categories.push(Category {
                id: tipus.to_string(),
                name: tipus.to_string(),
            });
        }
    }
    categories
}

/// Case-insensitive substring match over title, excerpt, description and location
pub fn matches_search(provider: &Provider, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let haystack = [
        provider.title.as_str(),
        provider.excerpt.as_str(),
        provider.acf.descripcion.as_deref().unwrap_or(""),
        provider.acf.ubicacio.as_deref().unwrap_or(""),
    ]
    .join(" ")
    .to_lowercase();

    haystack.contains(&query.to_lowercase())
}

pub fn matches_category(provider: &Provider, category: &CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Tipus(tipus) => provider.acf.tipus.as_deref() == Some(tipus.as_str()),
    }
}

/// Providers satisfying both predicates, in source order
pub fn filter_providers<'a>(
    providers: &'a [Provider],
    query: &str,
    category: &CategoryFilter,
) -> Vec<&'a Provider> {
    providers
        .iter()
        .filter(|p| matches_search(p, query) && matches_category(p, category))
        .collect()
}
