pub mod games;
pub mod health;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/games", post(games::create_game))
        .route("/games/{game_id}", get(games::game_state))
        .route("/games/{game_id}/gamers", post(games::join_game))
        .route("/games/{game_id}/turn", get(games::can_move))
        .route("/games/{game_id}/moves", post(games::make_move))
}
