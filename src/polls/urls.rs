//! URL configuration for the polls app.

use serde::Serialize;
use std::fmt;

use crate::routing::{RouteError, RouteTable, UrlConf};

/// Namespace of every route declared here.
pub const APP_NAME: &str = "polls";

/// Handlers the polls routes are bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PollsView {
    Index,
    Detail,
    Results,
    Vote,
}

/// How a view is implemented on the handler side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Class,
    Function,
}

impl PollsView {
    /// Name of the handler symbol the route is bound to.
    pub fn handler_name(self) -> &'static str {
        match self {
            PollsView::Index => "IndexView",
            PollsView::Detail => "DetailView",
            PollsView::Results => "ResultsView",
            PollsView::Vote => "vote",
        }
    }

    pub fn kind(self) -> ViewKind {
        match self {
            PollsView::Index | PollsView::Detail | PollsView::Results => ViewKind::Class,
            PollsView::Vote => ViewKind::Function,
        }
    }
}

impl fmt::Display for PollsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Class => f.write_str("class"),
            ViewKind::Function => f.write_str("function"),
        }
    }
}

/// The polls route table.
pub fn urlpatterns() -> Result<RouteTable<PollsView>, RouteError> {
    RouteTable::builder(APP_NAME)
        .path("", PollsView::Index, "index")
        .path("<int:pk>/", PollsView::Detail, "detail")
        .path("<int:pk>/results/", PollsView::Results, "results")
        .path("<int:question_id>/vote/", PollsView::Vote, "vote")
        .build()
}

/// The polls table mounted under `prefix`.
pub fn urlconf(prefix: &str) -> Result<UrlConf<PollsView>, RouteError> {
    Ok(UrlConf::mount(prefix, urlpatterns()?))
}
