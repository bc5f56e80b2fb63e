//! View handlers for the polls routes.
//!
//! The real views live with the application's data model. This module only
//! fixes the seam: each endpoint receives the parameters its route declares,
//! already typed, and returns a response.

use axum::{
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::polls::urls::{PollsView, ViewKind};
use crate::routing::PathParams;

/// Request data passed to every view.
#[derive(Debug, Clone)]
pub struct ViewRequest {
    pub method: Method,
    pub path: String,
    pub request_id: String,
    /// `namespace:name` of the matched route.
    pub view_name: String,
    pub params: PathParams,
}

/// Handlers bound by the polls route table.
pub trait PollsViews: Send + Sync + 'static {
    fn index(&self, req: &ViewRequest) -> Response;

    fn detail(&self, req: &ViewRequest, pk: u64) -> Response;

    fn results(&self, req: &ViewRequest, pk: u64) -> Response;

    fn vote(&self, req: &ViewRequest, question_id: u64) -> Response;
}

/// Answers every endpoint with a JSON description of the dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointEcho;

#[derive(Debug, Serialize)]
pub struct EchoBody<'a> {
    pub endpoint: &'a str,
    pub view: &'static str,
    pub kind: ViewKind,
    pub method: &'a str,
    pub path: &'a str,
    pub request_id: &'a str,
    pub params: &'a PathParams,
}

impl EndpointEcho {
    fn echo(&self, req: &ViewRequest, view: PollsView) -> Response {
        Json(EchoBody {
            endpoint: &req.view_name,
            view: view.handler_name(),
            kind: view.kind(),
            method: req.method.as_str(),
            path: &req.path,
            request_id: &req.request_id,
            params: &req.params,
        })
        .into_response()
    }
}

impl PollsViews for EndpointEcho {
    fn index(&self, req: &ViewRequest) -> Response {
        self.echo(req, PollsView::Index)
    }

    fn detail(&self, req: &ViewRequest, _pk: u64) -> Response {
        self.echo(req, PollsView::Detail)
    }

    fn results(&self, req: &ViewRequest, _pk: u64) -> Response {
        self.echo(req, PollsView::Results)
    }

    fn vote(&self, req: &ViewRequest, _question_id: u64) -> Response {
        self.echo(req, PollsView::Vote)
    }
}
