//! HTTP server implementation
//!
//! hyper http1 with TokioIo; one task per connection.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::cache::{self, CacheConfig, ContentCache};
use crate::config::SiteConfig;
use crate::content::ContentClient;
use crate::routes;
use crate::services;
use crate::types::SiteError;

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Shared application state
pub struct AppState {
    pub config: SiteConfig,
    /// Cached content client shared by every request
    pub client: Arc<ContentClient>,
}

impl AppState {
    pub fn new(config: SiteConfig, client: Arc<ContentClient>) -> Self {
        Self { config, client }
    }

    /// Create state with an HTTP content backend and a fresh cache
    pub fn from_config(config: SiteConfig, cache_config: CacheConfig) -> Result<Self, SiteError> {
        let cache = Arc::new(ContentCache::new(cache_config));
        let client = ContentClient::from_config(&config, cache)?;
        Ok(Self::new(config, Arc::new(client)))
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), SiteError> {
    let listener = TcpListener::bind(state.config.listen).await?;

    info!(
        "Site listening on {} as instance {}",
        state.config.listen, state.config.instance_id
    );

    let cache = state.client.cache();
    cache::spawn_cleanup_task(Arc::clone(cache));
    info!(
        "Cache enabled (max {} entries, revalidate {}s)",
        cache.config().max_entries,
        cache.config().revalidate.as_secs()
    );

    if state.config.warm_cache {
        services::spawn_warmup_task(Arc::clone(&state.client));
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    info!("[{}] {} {}", addr, method, path);

    let response = routes::dispatch(&state, &method, &path, query.as_deref()).await;
    debug!(status = response.status().as_u16(), path = %path, "Response ready");

    Ok(to_boxed(response))
}

/// Convert a Full<Bytes> body to BoxBody
fn to_boxed(response: Response<Full<Bytes>>) -> Response<BoxBody> {
    response.map(|body| body.map_err(|never| match never {}).boxed())
}
