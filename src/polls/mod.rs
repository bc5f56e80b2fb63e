//! The polls app.
//!
//! # Endpoints
//! ```text
//! polls:index    ""                        IndexView   (class)
//! polls:detail   "<int:pk>/"               DetailView  (class)
//! polls:results  "<int:pk>/results/"       ResultsView (class)
//! polls:vote     "<int:question_id>/vote/" vote        (function)
//! ```

pub mod urls;
pub mod views;

pub use urls::{urlconf, urlpatterns, PollsView, ViewKind, APP_NAME};
pub use views::{EndpointEcho, PollsViews, ViewRequest};
