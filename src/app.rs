use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/me", get(handlers::me))
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/api/entries/today",
            get(handlers::today_entry).put(handlers::save_today_entry),
        )
        .route(
            "/api/entries/:id",
            get(handlers::get_entry)
                .patch(handlers::update_entry)
                .delete(handlers::delete_entry),
        )
        .route("/api/moods", get(handlers::get_moods))
        .route("/api/moods/calendar", get(handlers::get_calendar))
        .route("/api/streak", get(handlers::get_streak))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/draft",
            get(handlers::get_draft)
                .put(handlers::put_draft)
                .delete(handlers::delete_draft),
        )
        .route("/api/draft/flush", post(handlers::flush_draft))
        .route("/api/draft/prompt", post(handlers::prompt_draft))
        .route("/api/songs/search", get(handlers::songs))
        .route("/api/prompt", get(handlers::prompt))
        .with_state(state)
}
