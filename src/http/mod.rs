//! HTTP boundary for the registry.
//!
//! Decodes JSON bodies into [`RecordDraft`](crate::RecordDraft) values, runs
//! field-format checks, invokes one [`RecordStore`] operation and maps the
//! outcome onto a status code:
//!
//! | Method | Path | Operation | Success |
//! |---|---|---|---|
//! | POST | `/api/users` | create | 201 |
//! | PUT | `/api/users` | update | 200 |
//! | PATCH | `/api/users` | partial update | 200 |
//! | DELETE | `/api/users` | delete | 204 |
//! | GET | `/api/users?startDate=&endDate=` | range query | 200 |
//! | GET | `/api/users/{email}` | lookup | 200 |
//!
//! Registry errors become 400 responses; handler panics become 500.

mod error;
mod routes;

use crate::store::RecordStore;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use error::{panic_response, ApiError, ErrorBody};
pub use routes::api_router;

/// Shared state accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .nest("/api", api_router())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
