//! Normalization from raw REST payloads to canonical records.
//!
//! WordPress nests media and custom fields inconsistently: `_embedded` may be
//! missing or carry an error object instead of media, `acf` may be an
//! object, an empty array or `false`, and individual ACF fields may be
//! `false`, numbers or blank strings. Each entity gets exactly one mapping
//! function here; after it runs, `featured_image` is either a valid absolute
//! URL or `None`, and every attribute is either a non-empty string or `None`.

use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use super::dates::PostDate;
use super::records::{Page, PostDetail, PostSummary, Provider, ProviderAttributes};
use crate::types::{Result, SiteError};

/// Fields common to posts, pages and providers
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: u64,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    title: Value,
    #[serde(default)]
    excerpt: Value,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    featured_image_url: Value,
    #[serde(default, rename = "_embedded")]
    embedded: Value,
    #[serde(default)]
    acf: Value,
}

/// Featured media resolved from `_embedded`
#[derive(Debug, Default)]
struct Media {
    source_url: Option<String>,
    alt: Option<String>,
}

/// The REST API always answers collection reads with an array
pub fn records(body: &Value) -> Result<&Vec<Value>> {
    body.as_array()
        .ok_or_else(|| SiteError::Decode("Expected a JSON array from the backend".to_string()))
}

/// First record of a slug-filtered read; later duplicates are ignored
pub fn first_record(body: &Value) -> Result<Option<&Value>> {
    Ok(records(body)?.first())
}

/// Slugs from a `_fields=slug` read; entries without a slug are skipped
pub fn slugs(body: &Value) -> Result<Vec<String>> {
    Ok(records(body)?
        .iter()
        .filter_map(|record| non_empty(record.get("slug")))
        .collect())
}

pub fn page(raw: &Value) -> Result<Page> {
    let raw = parse(raw)?;
    Ok(Page {
        title: rendered(&raw.title),
        content: rendered(&raw.content),
    })
}

pub fn post_summary(raw: &Value) -> Result<PostSummary> {
    let raw = parse(raw)?;
    let date = post_date(&raw)?;
    let media = featured_media(&raw.embedded);

    Ok(PostSummary {
        id: raw.id,
        title: rendered(&raw.title),
        excerpt: rendered(&raw.excerpt),
        date: date.display,
        datetime: date.iso,
        featured_image: media.source_url.or_else(|| valid_url(&raw.featured_image_url)),
        slug: raw.slug,
    })
}

pub fn post_detail(raw: &Value) -> Result<PostDetail> {
    let raw = parse(raw)?;
    let date = post_date(&raw)?;
    let media = featured_media(&raw.embedded);

    Ok(PostDetail {
        id: raw.id,
        date: date.display,
        datetime: date.iso,
        title: rendered(&raw.title),
        content: rendered(&raw.content),
        excerpt: rendered(&raw.excerpt),
        featured_image: media.source_url,
        featured_alt: media.alt,
        slug: raw.slug,
    })
}

pub fn provider(raw: &Value) -> Result<Provider> {
    let raw = parse(raw)?;
    let media = featured_media(&raw.embedded);

    Ok(Provider {
        id: raw.id,
        title: rendered(&raw.title),
        content: rendered(&raw.content),
        excerpt: rendered(&raw.excerpt),
        featured_image: media.source_url,
        featured_alt: media.alt,
        acf: attributes(&raw.acf),
        slug: raw.slug,
    })
}

fn parse(raw: &Value) -> Result<RawRecord> {
    RawRecord::deserialize(raw)
        .map_err(|e| SiteError::Decode(format!("Unexpected record shape: {}", e)))
}

fn post_date(raw: &RawRecord) -> Result<PostDate> {
    let date = raw
        .date
        .as_deref()
        .ok_or_else(|| SiteError::Decode(format!("Post {} has no date", raw.id)))?;
    PostDate::parse(date)
}

/// `{"rendered": "..."}` or a bare string; anything else is empty
fn rendered(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("rendered")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

fn featured_media(embedded: &Value) -> Media {
    let Some(media) = embedded
        .get("wp:featuredmedia")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
    else {
        return Media::default();
    };

    let alt = non_empty(media.get("alt_text")).or_else(|| {
        media
            .get("title")
            .map(rendered)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    });

    Media {
        source_url: media.get("source_url").and_then(valid_url),
        alt,
    }
}

fn attributes(acf: &Value) -> ProviderAttributes {
    let empty = Map::new();
    let fields = acf.as_object().unwrap_or(&empty);
    let field = |names: &[&str]| names.iter().find_map(|name| scalar(fields.get(*name)));

    ProviderAttributes {
        tipus: field(&["tipus"]),
        ubicacio: field(&["ubicacio", "ubicacion"]),
        web: field(&["web"]),
        email: field(&["email"]),
        telefon: field(&["telefon", "telefono"]),
        descripcion: field(&["descripcion"]),
    }
}

/// Non-empty trimmed string, or a number rendered as text
fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        other => non_empty(Some(other)),
    }
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn valid_url(value: &Value) -> Option<String> {
    let raw = value.as_str()?.trim();
    Url::parse(raw).ok().map(|_| raw.to_string())
}
