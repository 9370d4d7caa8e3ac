use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/progress/toggle", post(handlers::toggle_form))
        .route("/theme/toggle", post(handlers::theme_form))
        .route("/auth/sign-in", post(handlers::sign_in_form))
        .route("/auth/sign-out", post(handlers::sign_out_form))
        .route("/api/platforms", get(handlers::list_platforms))
        .route("/api/platforms/:id", get(handlers::get_platform))
        .route("/api/search", get(handlers::search))
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/progress/toggle", post(handlers::toggle))
        .route("/api/theme", get(handlers::get_theme))
        .route("/api/theme/toggle", post(handlers::toggle_theme))
        .route(
            "/api/user",
            get(handlers::get_user)
                .post(handlers::sign_in)
                .delete(handlers::sign_out),
        )
        .route("/api/tools", get(handlers::list_tools))
        .route("/api/tutorials", get(handlers::list_tutorials))
        .with_state(state)
}
