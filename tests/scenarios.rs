//! End-to-end page scenarios over a mock content backend

use bytes::Bytes;
use clap::Parser;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Response, StatusCode};
use igualitaria::cache::ContentCache;
use igualitaria::config::{Args, SiteConfig};
use igualitaria::content::{ContentClient, MockBackend};
use igualitaria::routes::dispatch;
use igualitaria::{AppState, SiteError};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

fn state_with(backend: MockBackend) -> AppState {
    let config = SiteConfig::for_backend("http://wp.test").unwrap();
    let client = ContentClient::new(
        &config,
        Arc::new(backend),
        Arc::new(ContentCache::with_defaults()),
    );
    AppState::new(config, Arc::new(client))
}

async fn get(state: &AppState, target: &str) -> (StatusCode, String) {
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };
    let response: Response<Full<Bytes>> = dispatch(state, &Method::GET, path, query).await;
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn assemblea() -> Value {
    json!({
        "id": 42,
        "slug": "assemblea-maig",
        "date": "2024-05-10T00:00:00",
        "title": {"rendered": "Assemblea de maig"},
        "excerpt": {"rendered": "<p>Ens trobem a <strong>l'assemblea</strong></p>"},
        "content": {"rendered": "<p>Ordre del dia</p>"},
        "_embedded": {
            "wp:featuredmedia": [{
                "source_url": "https://wp.test/uploads/assemblea.jpg",
                "title": {"rendered": "Assemblea"}
            }]
        }
    })
}

fn provider(id: u64, slug: &str, title: &str, tipus: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "title": {"rendered": title},
        "excerpt": {"rendered": ""},
        "content": {"rendered": ""},
        "acf": {"tipus": tipus, "ubicacion": "Lleida"}
    })
}

fn providers_backend() -> MockBackend {
    MockBackend::new().with_json(
        "proveedores?per_page=50&_embed",
        json!([
            provider(1, "hort-del-pla", "Hort del Pla", "fruites"),
            provider(2, "fruita-dolca", "Fruita Dolça", "fruites"),
            provider(3, "formatges-serrats", "Formatges Serrats", "lactis")
        ]),
    )
}

#[tokio::test]
async fn test_post_detail_page() {
    let state = state_with(MockBackend::new().with_json("posts?slug=assemblea-maig&_embed", json!([assemblea()])));

    let (status, body) = get(&state, "/blog/assemblea-maig").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Assemblea de maig - La Igualitària</title>"));
    assert!(body.contains("<time datetime=\"2024-05-10T00:00:00.000Z\">10 de maig del 2024</time>"));
    assert!(body.contains("alt=\"Assemblea\""));
    assert!(body.contains("content=\"Ens trobem a l&#39;assemblea\""));
}

#[tokio::test]
async fn test_blog_index_lists_post() {
    let state = state_with(MockBackend::new().with_json("posts?per_page=100&_embed", json!([assemblea()])));

    let (status, body) = get(&state, "/blog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/blog/assemblea-maig\""));
    assert!(body.contains("10 de maig del 2024"));
}

#[tokio::test]
async fn test_home_without_cms_page_is_not_found() {
    let state = state_with(MockBackend::new().with_json("posts?per_page=3&_embed", json!([assemblea()])));

    let (status, body) = get(&state, "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Ho sentim, no hem trobat aquesta pàgina"));
    assert!(!body.contains("href=\"/blog/assemblea-maig\""));
}

#[tokio::test]
async fn test_latest_post_summary_timestamp() {
    let state = state_with(MockBackend::new().with_json("posts?per_page=3&_embed", json!([assemblea()])));
    let posts = state.client.latest_posts(3).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].datetime, "2024-05-10T00:00:00.000Z");
    assert_eq!(posts[0].date, "10 de maig del 2024");
}

#[tokio::test]
async fn test_directory_category_filter() {
    let state = state_with(providers_backend());

    let (status, body) = get(&state, "/api/proveidors?categoria=fruites").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["total"], 2);
    let ids: Vec<&str> = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["all", "fruites", "lactis"]);

    let (_, html) = get(&state, "/proveidors?categoria=lactis").await;
    assert!(html.contains("href=\"/proveidors/formatges-serrats\""));
    assert!(!html.contains("href=\"/proveidors/hort-del-pla\""));

    let (_, html) = get(&state, "/proveidors?q=DOL%C3%87A").await;
    assert!(html.contains("href=\"/proveidors/fruita-dolca\""));
    assert!(!html.contains("href=\"/proveidors/formatges-serrats\""));

    let (_, html) = get(&state, "/proveidors?q=inexistent").await;
    assert!(html.contains("No s'han trobat proveïdors"));
}

#[tokio::test]
async fn test_directory_backend_failure_renders_inline_error() {
    let state = state_with(MockBackend::new().with_status("proveedores?per_page=50&_embed", 500));

    let (status, html) = get(&state, "/proveidors").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error carregant proveïdors"));
    assert!(!html.contains("wp.test"));
    assert!(!html.contains("wp-json"));

    let (status, body) = get(&state, "/api/proveidors").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body.contains("wp.test"));
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "El servidor de continguts no està disponible (502)");
}

#[test]
fn test_missing_backend_origin_is_fatal() {
    let args = Args::parse_from(["igualitaria"]);
    let err = assert_err!(args.validate());
    assert!(matches!(err, SiteError::Config(_)));

    let args = Args::parse_from(["igualitaria", "--wp-domain", "https://wp.example"]);
    assert_ok!(args.validate());
}

#[tokio::test]
async fn test_missing_post_renders_not_found() {
    let state = state_with(MockBackend::new());

    let (status, body) = get(&state, "/blog/no-existeix").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Ho sentim, no hem trobat aquesta pàgina"));
    assert!(body.contains("<title>Post no trobat</title>"));

    let (status, body) = get(&state, "/proveidors/no-existeix").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<title>Proveïdor no trobat</title>"));

    let (status, _) = get(&state, "/no/existeix").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_backend_failure_renders_error_page() {
    let state = state_with(MockBackend::new().with_status("posts?per_page=100&_embed", 503));
    let (status, body) = get(&state, "/blog").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body.contains("wp.test"));

    let state = state_with(MockBackend::new().unreachable());
    let (status, _) = get(&state, "/").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_home_and_about_pages() {
    let backend = MockBackend::new()
        .with_json(
            "pages?slug=la-igualitaria&_embed",
            json!([{"id": 1, "title": {"rendered": "La Igualitària"}, "content": {"rendered": "<p>Economat</p>"}}]),
        )
        .with_json("posts?per_page=3&_embed", json!([assemblea()]))
        .with_json(
            "pages?slug=qui-som&_embed",
            json!([{"id": 2, "title": {"rendered": "Qui som"}, "content": {"rendered": "<p>Cooperativa</p>"}}]),
        );
    let state = state_with(backend);

    let (status, body) = get(&state, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p>Economat</p>"));
    assert!(body.contains("href=\"/blog/assemblea-maig\""));

    let (status, body) = get(&state, "/qui-som/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p>Cooperativa</p>"));

    let (status, _) = get(&state, "/fer-se-soci").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&state, "/comunitat").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_crawler_documents() {
    let backend = MockBackend::new()
        .with_json("posts?per_page=50&_embed", json!([assemblea()]))
        .with_json(
            "proveedores?per_page=100&_fields=slug",
            json!([{"slug": "formatges-serrats"}]),
        );
    let state = state_with(backend);

    let (status, robots) = get(&state, "/robots.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert!(robots.contains("Sitemap: https://laigualitaria.coop/sitemap.xml"));

    let (status, xml) = get(&state, "/sitemap.xml").await;
    assert_eq!(status, StatusCode::OK);
    assert!(xml.contains("<loc>https://laigualitaria.coop/blog/assemblea-maig</loc>"));
    assert!(xml.contains("<lastmod>2024-05-10T00:00:00.000Z</lastmod>"));
    assert!(xml.contains("<loc>https://laigualitaria.coop/proveidors/formatges-serrats</loc>"));
    assert!(xml.contains("<loc>https://laigualitaria.coop/comunitat</loc>"));
}

#[tokio::test]
async fn test_health_and_method_not_allowed() {
    let state = state_with(MockBackend::new());
    let (status, body) = get(&state, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"healthy\":true"));

    let response = dispatch(&state, &Method::POST, "/blog", None).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
