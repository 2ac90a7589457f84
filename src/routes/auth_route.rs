use axum::{routing::post, Router};

use crate::controllers::auth_controller::{
    login_challenge, login_verify, register_challenge, register_verify,
};

pub fn auth_router() -> Router {
    Router::new()
        .route("/register/challenge", post(register_challenge))
        .route("/register/verify", post(register_verify))
        .route("/login/challenge", post(login_challenge))
        .route("/login/verify", post(login_verify))
}
