pub mod pages;

pub use pages::*;

use crate::{auth::AuthClient, geo::GeolocationOptions, signup::FormRegistry};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub struct AppState {
    pub auth: Arc<dyn AuthClient>,
    pub forms: FormRegistry,
    /// Options handed to the browser geolocation request and applied to posted positions
    pub geolocation: GeolocationOptions,
}

/// Page routes. Session and trace layers are added by the caller.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/signup", get(signup_page).post(signup))
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .route("/dashboard", get(dashboard_page))
        .with_state(state)
}
