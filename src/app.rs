use axum::{
    http::{header, HeaderValue},
    Extension, Router,
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::cors::init_cors;
use crate::config::startup::AppState;
use crate::controllers::auth_controller::hello;
use crate::routes::auth_route::auth_router;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(auth_router())
        .fallback(hello)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
        .layer(init_cors())
}
