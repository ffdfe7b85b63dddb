//! ContentClient against a real HTTP backend (wiremock)

use igualitaria::cache::ContentCache;
use igualitaria::config::SiteConfig;
use igualitaria::content::ContentClient;
use igualitaria::SiteError;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ContentClient {
    let config = SiteConfig::for_backend(&server.uri()).unwrap();
    ContentClient::from_config(&config, Arc::new(ContentCache::with_defaults())).unwrap()
}

#[tokio::test]
async fn test_post_detail_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("slug", "assemblea-maig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 42,
            "slug": "assemblea-maig",
            "date": "2024-05-10T00:00:00",
            "title": {"rendered": "Assemblea de maig"},
            "excerpt": {"rendered": "<p>Resum</p>"},
            "content": {"rendered": "<p>Cos</p>"},
            "_embedded": {
                "wp:featuredmedia": [{
                    "source_url": "https://wp.example/uploads/assemblea.jpg",
                    "alt_text": "Sòcies a l'assemblea"
                }]
            }
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let post = client.post_by_slug("assemblea-maig").await.unwrap().unwrap();
    assert_eq!(post.title, "Assemblea de maig");
    assert_eq!(post.datetime, "2024-05-10T00:00:00.000Z");
    assert_eq!(post.featured_alt.as_deref(), Some("Sòcies a l'assemblea"));

    // Second read inside the revalidation window is served from the cache
    let again = client.post_by_slug("assemblea-maig").await.unwrap().unwrap();
    assert_eq!(again, post);
}

#[tokio::test]
async fn test_error_status_carries_url_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/proveedores"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.providers(50).await {
        Err(SiteError::Backend { url, status }) => {
            assert_eq!(status, 500);
            assert_eq!(
                url,
                format!("{}/wp-json/wp/v2/proveedores?per_page=50&_embed", server.uri())
            );
        }
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/pages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.page_by_slug("qui-som").await.unwrap_err();
    assert!(matches!(err, SiteError::Decode(_)));
}

#[tokio::test]
async fn test_slug_enumeration_requests_slug_field_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("_fields", "slug"))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"slug": "a"}, {"slug": "b"}])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.all_post_slugs().await.unwrap(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_unreachable_backend() {
    let config = SiteConfig::for_backend("http://127.0.0.1:1").unwrap();
    let client =
        ContentClient::from_config(&config, Arc::new(ContentCache::with_defaults())).unwrap();
    let err = client.latest_posts(3).await.unwrap_err();
    assert!(matches!(err, SiteError::Unreachable { .. }));
}
