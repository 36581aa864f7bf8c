use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::TrioError,
    models::{CascadeResult, Coordinates, Game, Response},
    AppState,
};

/// Status code plus the `{data}` / `{error}` body
pub type ApiResponse<T> = (StatusCode, Json<Response<T>>);

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Deserialize)]
pub struct JoinGameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub gamer_id: String,
    pub source: Coordinates,
    pub dest: Coordinates,
}

#[derive(Debug, Deserialize)]
pub struct GamerQuery {
    pub gamer_id: String,
}

/// Create a game and return its id
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateGameRequest>, JsonRejection>,
) -> ApiResponse<String> {
    let result = body(payload)
        .and_then(|request| state.service.create_game(request.width, request.height));
    respond(result)
}

/// Join a game and return the new gamer's id
pub async fn join_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    payload: Result<Json<JoinGameRequest>, JsonRejection>,
) -> ApiResponse<String> {
    let result = body(payload).and_then(|request| state.service.join_game(&game_id, &request.name));
    respond(result)
}

/// Whether it is the caller's turn
pub async fn can_move(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    query: Result<Query<GamerQuery>, QueryRejection>,
) -> ApiResponse<bool> {
    let result = gamer_query(query).and_then(|gamer_id| state.service.can_move(&game_id, &gamer_id));
    respond(result)
}

/// Swap two cells on the caller's behalf
pub async fn make_move(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> ApiResponse<CascadeResult> {
    let result = body(payload).and_then(|request| {
        state
            .service
            .make_move(&game_id, &request.gamer_id, request.source, request.dest)
    });
    respond(result)
}

/// Full game snapshot for a seated gamer
pub async fn game_state(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    query: Result<Query<GamerQuery>, QueryRejection>,
) -> ApiResponse<Game> {
    let result =
        gamer_query(query).and_then(|gamer_id| state.service.game_state(&game_id, &gamer_id));
    respond(result)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, TrioError> {
    payload
        .map(|Json(request)| request)
        .map_err(|e| TrioError::Validation(e.body_text()))
}

fn gamer_query(query: Result<Query<GamerQuery>, QueryRejection>) -> Result<String, TrioError> {
    query
        .map(|Query(q)| q.gamer_id)
        .map_err(|e| TrioError::Validation(e.body_text()))
}

fn respond<T: Serialize>(result: Result<T, TrioError>) -> ApiResponse<T> {
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    (status, Json(result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GameConfig,
        routes::create_routes,
        service::TrioService,
    };
    use axum::{
        body::Body,
        http::{header, Request},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let game = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        let state = Arc::new(AppState {
            service: TrioService::in_memory(game),
        });
        create_routes().with_state(state)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = tokio_test::assert_ok!(serde_json::from_slice::<Value>(&bytes));
        (status, json)
    }

    /// Creates a game and seats alice and bob: (game id, alice id, bob id)
    async fn started(app: &Router) -> (String, String, String) {
        let (_, created) = call(app, "POST", "/api/games", Some(json!({"width": 5, "height": 5}))).await;
        let game_id = created["data"].as_str().unwrap().to_string();

        let uri = format!("/api/games/{}/gamers", game_id);
        let (_, alice) = call(app, "POST", &uri, Some(json!({"name": "alice"}))).await;
        let (_, bob) = call(app, "POST", &uri, Some(json!({"name": "bob"}))).await;

        (
            game_id,
            alice["data"].as_str().unwrap().to_string(),
            bob["data"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_too_small_game() {
        let (status, body) = call(
            &app(),
            "POST",
            "/api/games",
            Some(json!({"width": 2, "height": 2})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert!(body.get("data").is_none(), "Error bodies carry no data");
    }

    #[tokio::test]
    async fn test_malformed_body_gets_error_body() {
        let (status, body) = call(&app(), "POST", "/api/games", Some(json!({"width": "wide"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_full_session_over_http() {
        let app = app();
        let (game_id, alice, bob) = started(&app).await;

        let (status, body) = call(
            &app,
            "GET",
            &format!("/api/games/{}/turn?gamer_id={}", game_id, alice),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": true}));

        let (_, body) = call(
            &app,
            "GET",
            &format!("/api/games/{}/turn?gamer_id={}", game_id, bob),
            None,
        )
        .await;
        assert_eq!(body, json!({"data": false}));

        let (status, body) = call(
            &app,
            "GET",
            &format!("/api/games/{}?gamer_id={}", game_id, bob),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "in_progress");
        assert_eq!(body["data"]["current_gamer_name"], "alice");
        assert_eq!(body["data"]["board"]["cells"].as_array().unwrap().len(), 5);
        assert!(
            !body.to_string().contains(&alice),
            "Snapshots must not reveal gamer ids"
        );

        // Out of turn: a successful no-op
        let (status, body) = call(
            &app,
            "POST",
            &format!("/api/games/{}/moves", game_id),
            Some(json!({
                "gamer_id": bob,
                "source": {"x": 0, "y": 0},
                "dest": {"x": 1, "y": 0}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": {"states": [], "score": 0}}));

        // In turn but not adjacent
        let (status, body) = call(
            &app,
            "POST",
            &format!("/api/games/{}/moves", game_id),
            Some(json!({
                "gamer_id": alice,
                "source": {"x": 0, "y": 0},
                "dest": {"x": 2, "y": 0}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("not adjacent"));
    }

    #[tokio::test]
    async fn test_duplicate_name_conflict() {
        let app = app();
        let (_, created) = call(&app, "POST", "/api/games", Some(json!({"width": 4, "height": 4}))).await;
        let uri = format!("/api/games/{}/gamers", created["data"].as_str().unwrap());

        let (status, _) = call(&app, "POST", &uri, Some(json!({"name": "alice"}))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = call(&app, "POST", &uri, Some(json!({"name": "alice"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_game_and_stranger() {
        let app = app();
        let (game_id, _, _) = started(&app).await;

        let (status, _) = call(
            &app,
            "POST",
            "/api/games/NOSUCHGAME/gamers",
            Some(json!({"name": "carol"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(
            &app,
            "GET",
            &format!("/api/games/{}?gamer_id=INTRUDER", game_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            json!({"error": "you are not allowed to perform this action"})
        );

        let (status, body) = call(&app, "GET", &format!("/api/games/{}/turn", game_id), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "gamer_id is required");
        assert!(body["error"].is_string());
    }
}
