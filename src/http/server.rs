//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with one dispatch handler
//! - Wire up middleware (tracing, limits, timeout, request ID)
//! - Resolve every request path through the polls route table
//! - Call the bound view with its typed parameters
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::SiteConfig;
use crate::http::request::{request_id_middleware, RequestIdExt};
use crate::http::response::AppError;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::polls::{self, EndpointEcho, PollsView, PollsViews, ViewRequest};
use crate::routing::{RouteError, UrlConf};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub urls: Arc<UrlConf<PollsView>>,
    pub views: Arc<dyn PollsViews>,
    pub debug_not_found: bool,
}

/// HTTP server for the polls site.
pub struct HttpServer {
    router: Router,
    config: SiteConfig,
    urls: Arc<UrlConf<PollsView>>,
}

impl HttpServer {
    /// Create a server whose views echo the resolved endpoint.
    pub fn new(config: SiteConfig) -> Result<Self, RouteError> {
        Self::with_views(config, Arc::new(EndpointEcho))
    }

    /// Create a server dispatching to `views`.
    pub fn with_views(config: SiteConfig, views: Arc<dyn PollsViews>) -> Result<Self, RouteError> {
        let urls = Arc::new(polls::urlconf(&config.urls.mount_prefix)?);

        tracing::info!(
            namespace = %urls.table().namespace(),
            prefix = %urls.prefix(),
            routes = urls.table().len(),
            "Route table loaded"
        );

        let state = AppState {
            urls: urls.clone(),
            views,
            debug_not_found: config.urls.debug_not_found,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            urls,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let request_id = req.request_id().map(|id| id.as_str()).unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(middleware::from_fn(request_id_middleware))
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.urls.prefix(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process testing.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn urls(&self) -> &Arc<UrlConf<PollsView>> {
        &self.urls
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}

/// Resolve the request path and call the bound view.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request
        .request_id()
        .map(|id| id.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let path = request.uri().path().to_string();
    let method = request.method().clone();

    let Some(resolved) = state.urls.resolve(&path) else {
        tracing::debug!(request_id = %request_id, path = %path, "No route matched");
        metrics::record_unmatched();
        metrics::record_request("none", 404, start);

        let tried = state.debug_not_found.then(|| {
            state
                .urls
                .table()
                .routes()
                .map(|route| format!("{}{}", state.urls.prefix(), route.pattern))
                .collect()
        });
        return AppError::NotFound { path, tried }.into_response();
    };

    let view = *resolved.handler();
    let view_name = resolved.view_name();

    tracing::debug!(
        request_id = %request_id,
        view = %view_name,
        handler = %view,
        kind = %view.kind(),
        params = ?resolved.params,
        "Dispatching"
    );

    let req = ViewRequest {
        method,
        path,
        request_id,
        view_name: view_name.clone(),
        params: resolved.params,
    };

    let response = match call_view(state.views.as_ref(), view, &req) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %req.request_id, error = %e, "View dispatch failed");
            e.into_response()
        }
    };

    metrics::record_request(&view_name, response.status().as_u16(), start);
    response
}

fn call_view(views: &dyn PollsViews, view: PollsView, req: &ViewRequest) -> Result<Response, AppError> {
    let int_param = |name: &'static str| {
        req.params
            .get_int(name)
            .ok_or_else(|| AppError::MissingParam {
                view_name: req.view_name.clone(),
                param: name,
            })
    };

    Ok(match view {
        PollsView::Index => views.index(req),
        PollsView::Detail => views.detail(req, int_param("pk")?),
        PollsView::Results => views.results(req, int_param("pk")?),
        PollsView::Vote => views.vote(req, int_param("question_id")?),
    })
}
