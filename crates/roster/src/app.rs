use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::{healthz, livez, readyz},
        profiles::{get_profile, upsert_profile},
        users::{create_user, create_users, delete_user, get_user, list_users, update_user},
    },
    state::{AppState, UserFamily},
};

/// Routes served by each family, bound to that family's repositories.
pub fn user_routes<S>(family: UserFamily) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/batch", post(create_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/profile", get(get_profile).put(upsert_profile))
        .with_state(family)
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/sql", user_routes(state.sql.clone()))
        .nest("/orm", user_routes(state.orm.clone()))
        .layer(cors)
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
