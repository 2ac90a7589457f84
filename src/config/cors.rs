use std::time::Duration;

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// The wire contract is deliberately permissive: any origin may drive the
/// challenge/verify endpoints, and preflight results are cacheable for a day.
/// Origin checking happens in the verification engine, not at the CORS layer.
pub fn init_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any)
        .max_age(Duration::from_secs(86400))
}
