use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::auth::AuthService;
use crate::service::GameService;
use game_types::{GameError, User};

pub mod auth;
pub mod config;
pub mod service;
pub mod session_store;

#[derive(Deserialize)]
struct GuessRequest {
    guess: String,
}

#[derive(Deserialize)]
struct AddWordRequest {
    word: String,
}

#[derive(Deserialize)]
struct UpdateWordRequest {
    is_active: bool,
}

#[derive(Deserialize)]
struct DailyReportQuery {
    date: Option<String>,
}

pub fn create_routes(
    game_service: Arc<GameService>,
    auth_service: Arc<AuthService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // Clone for filters
    let service_filter = warp::any().map({
        let game_service = game_service.clone();
        move || game_service.clone()
    });

    let auth_filter = warp::any().map({
        let auth_service = auth_service.clone();
        move || auth_service.clone()
    });

    let auth_header = warp::header::optional::<String>("authorization");

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let start_game = warp::path!("start-game")
        .and(warp::post())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_start_game);

    let play = warp::path!("play" / Uuid)
        .and(warp::post())
        .and(warp::body::json())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_play);

    let hint = warp::path!("play" / Uuid / "hint")
        .and(warp::post())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_hint);

    let game_state = warp::path!("game" / Uuid)
        .and(warp::get())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_game_state);

    let history = warp::path!("history")
        .and(warp::get())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_history);

    let my_stats = warp::path!("me" / "stats")
        .and(warp::get())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_my_stats);

    // Admin endpoints
    let dashboard = warp::path!("admin" / "dashboard")
        .and(warp::get())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_dashboard);

    let daily_report = warp::path!("admin" / "reports" / "daily")
        .and(warp::get())
        .and(warp::query::<DailyReportQuery>())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_daily_report);

    let user_report = warp::path!("admin" / "reports" / "users" / Uuid)
        .and(warp::get())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_user_report);

    let list_words = warp::path!("admin" / "words")
        .and(warp::get())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_list_words);

    let add_word = warp::path!("admin" / "words")
        .and(warp::post())
        .and(warp::body::json())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_add_word);

    let update_word = warp::path!("admin" / "words" / Uuid)
        .and(warp::put())
        .and(warp::body::json())
        .and(auth_header)
        .and(service_filter.clone())
        .and(auth_filter.clone())
        .and_then(handle_update_word);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "authorization"])
        .allow_methods(vec!["GET", "POST", "PUT"]);

    health
        .or(start_game)
        .or(hint)
        .or(play)
        .or(game_state)
        .or(history)
        .or(my_stats)
        .or(dashboard)
        .or(daily_report)
        .or(user_report)
        .or(list_words)
        .or(add_word)
        .or(update_word)
        .with(cors)
        .with(warp::log("daily_word"))
}

fn error_reply(err: GameError) -> WithStatus<Json> {
    let status = match &err {
        GameError::HintAlreadyUsed => StatusCode::TOO_MANY_REQUESTS,
        GameError::NotFound => StatusCode::NOT_FOUND,
        GameError::TransientStoreFailure { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_REQUEST,
    };
    warp::reply::with_status(warp::reply::json(&err), status)
}

/// Resolve the caller, provisioning the user row on first sight. The
/// `Err` side is a ready-to-send reply.
async fn resolve_user(
    auth_header: Option<String>,
    auth_service: &AuthService,
    game_service: &GameService,
) -> Result<User, WithStatus<Json>> {
    let identity = auth_service
        .authenticate(auth_header.as_deref())
        .map_err(|err| {
            warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "error": err.to_string()
                })),
                StatusCode::UNAUTHORIZED,
            )
        })?;

    game_service.ensure_user(&identity).await.map_err(error_reply)
}

fn require_admin(user: &User) -> Result<(), WithStatus<Json>> {
    if user.is_admin {
        Ok(())
    } else {
        Err(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "error": "Admin access required"
            })),
            StatusCode::FORBIDDEN,
        ))
    }
}

async fn handle_start_game(
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    match service.start_game(&user).await {
        Ok(view) => Ok(warp::reply::with_status(
            warp::reply::json(&view),
            StatusCode::CREATED,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_play(
    game_id: Uuid,
    body: GuessRequest,
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    match service.submit_guess(&user, game_id, &body.guess).await {
        Ok(outcome) => Ok(warp::reply::with_status(
            warp::reply::json(&outcome),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_hint(
    game_id: Uuid,
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    match service.request_hint(&user, game_id).await {
        Ok(hint) => Ok(warp::reply::with_status(
            warp::reply::json(&hint),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_game_state(
    game_id: Uuid,
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    match service.game_view(&user, game_id).await {
        Ok(view) => Ok(warp::reply::with_status(
            warp::reply::json(&view),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_history(
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    match service.history(&user).await {
        Ok(views) => Ok(warp::reply::with_status(
            warp::reply::json(&views),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_my_stats(
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };

    match service.player_stats(&user).await {
        Ok(stats) => Ok(warp::reply::with_status(
            warp::reply::json(&stats),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_dashboard(
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    if let Err(reply) = require_admin(&user) {
        return Ok(reply);
    }

    match service.dashboard_summary().await {
        Ok(summary) => Ok(warp::reply::with_status(
            warp::reply::json(&summary),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_daily_report(
    query: DailyReportQuery,
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    if let Err(reply) = require_admin(&user) {
        return Ok(reply);
    }

    let date = match query.date {
        Some(raw) => match raw.parse::<NaiveDate>() {
            Ok(date) => date,
            Err(_) => {
                return Ok(warp::reply::with_status(
                    warp::reply::json(&serde_json::json!({
                        "error": "Invalid date format, expected YYYY-MM-DD"
                    })),
                    StatusCode::BAD_REQUEST,
                ));
            }
        },
        None => Utc::now().date_naive(),
    };

    match service.daily_report(date).await {
        Ok(report) => Ok(warp::reply::with_status(
            warp::reply::json(&report),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_user_report(
    user_id: Uuid,
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    if let Err(reply) = require_admin(&user) {
        return Ok(reply);
    }

    match service.user_report(user_id).await {
        Ok(report) => Ok(warp::reply::with_status(
            warp::reply::json(&report),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_list_words(
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    if let Err(reply) = require_admin(&user) {
        return Ok(reply);
    }

    match service.list_words().await {
        Ok(words) => Ok(warp::reply::with_status(
            warp::reply::json(&words),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_add_word(
    body: AddWordRequest,
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    if let Err(reply) = require_admin(&user) {
        return Ok(reply);
    }

    match service.add_word(&body.word).await {
        Ok((word, created)) => Ok(warp::reply::with_status(
            warp::reply::json(&word),
            if created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            },
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

async fn handle_update_word(
    word_id: Uuid,
    body: UpdateWordRequest,
    auth_header: Option<String>,
    service: Arc<GameService>,
    auth: Arc<AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = match resolve_user(auth_header, &auth, &service).await {
        Ok(user) => user,
        Err(reply) => return Ok(reply),
    };
    if let Err(reply) = require_admin(&user) {
        return Ok(reply);
    }

    match service.set_word_active(word_id, body.is_active).await {
        Ok(word) => Ok(warp::reply::with_status(
            warp::reply::json(&word),
            StatusCode::OK,
        )),
        Err(err) => Ok(error_reply(err)),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use game_persistence::repositories::{UserRepository, WordRepository};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::DatabaseConnection;

    async fn create_test_app() -> (
        impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone,
        DatabaseConnection,
    ) {
        let db = game_persistence::connection::connect_to_memory_database()
            .await
            .unwrap();
        Migrator::up(&db, None).await.unwrap();

        let game_service = Arc::new(GameService::new(db.clone(), 3, 5));
        let auth_service = Arc::new(AuthService::new());
        (create_routes(game_service, auth_service), db)
    }

    async fn seed_word(db: &DatabaseConnection, word: &str) {
        WordRepository::new(db.clone()).add_word(word).await.unwrap();
    }

    /// Creates an admin user and returns a bearer token for them.
    async fn admin_token(db: &DatabaseConnection) -> String {
        let users = UserRepository::new(db.clone());
        let id = Uuid::new_v4();
        users.ensure_user(id, "admin").await.unwrap();
        users.set_admin(id, true).await.unwrap();
        format!("Bearer {id}:admin")
    }

    fn player_token() -> String {
        format!("Bearer {}:alice", Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _db) = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/health")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), "OK");
    }

    #[tokio::test]
    async fn test_start_game_requires_auth() {
        let (app, db) = create_test_app().await;
        seed_word(&db, "ABOUT").await;

        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 401);

        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .header("authorization", "Bearer not-a-uuid")
            .reply(&app)
            .await;
        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn test_full_game_flow() {
        let (app, db) = create_test_app().await;
        seed_word(&db, "ABOUT").await;
        let token = player_token();

        // Start a game
        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .header("authorization", &token)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 201);

        let view: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(view["status"], "Active");
        assert_eq!(view["remaining_guesses"], 5);
        assert!(view["target_word"].is_null());
        let game_id = view["id"].as_str().unwrap().to_string();

        // A wrong guess
        let response = warp::test::request()
            .method("POST")
            .path(&format!("/play/{game_id}"))
            .header("authorization", &token)
            .json(&serde_json::json!({"guess": "allow"}))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);

        let outcome: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(outcome["status"], "Active");
        assert_eq!(outcome["remaining_guesses"], 4);
        assert_eq!(outcome["guess"]["word"], "ALLOW");
        assert!(outcome["target_word"].is_null());

        // The winning guess reveals the target
        let response = warp::test::request()
            .method("POST")
            .path(&format!("/play/{game_id}"))
            .header("authorization", &token)
            .json(&serde_json::json!({"guess": "ABOUT"}))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);

        let outcome: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(outcome["status"], "Won");
        assert_eq!(outcome["target_word"], "ABOUT");

        // Game state now shows the completed game
        let response = warp::test::request()
            .method("GET")
            .path(&format!("/game/{game_id}"))
            .header("authorization", &token)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);

        let view: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(view["status"], "Won");
        assert_eq!(view["target_word"], "ABOUT");
        assert_eq!(view["guesses"].as_array().unwrap().len(), 2);

        // History and stats reflect it
        let response = warp::test::request()
            .method("GET")
            .path("/history")
            .header("authorization", &token)
            .reply(&app)
            .await;
        let history: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(history.as_array().unwrap().len(), 1);

        let response = warp::test::request()
            .method("GET")
            .path("/me/stats")
            .header("authorization", &token)
            .reply(&app)
            .await;
        let stats: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(stats["games_played"], 1);
        assert_eq!(stats["games_won"], 1);
    }

    #[tokio::test]
    async fn test_second_start_reports_active_game() {
        let (app, db) = create_test_app().await;
        seed_word(&db, "ABOUT").await;
        let token = player_token();

        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .header("authorization", &token)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 201);
        let view: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        let game_id = view["id"].as_str().unwrap().to_string();

        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .header("authorization", &token)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);

        let error: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(error["kind"], "game_already_active");
        assert_eq!(error["game_id"], game_id.as_str());
    }

    #[tokio::test]
    async fn test_daily_limit_enforced() {
        let (app, db) = create_test_app().await;
        seed_word(&db, "ABOUT").await;
        let token = player_token();

        // Play three games to completion
        for _ in 0..3 {
            let response = warp::test::request()
                .method("POST")
                .path("/start-game")
                .header("authorization", &token)
                .reply(&app)
                .await;
            assert_eq!(response.status(), 201);
            let view: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
            let game_id = view["id"].as_str().unwrap().to_string();

            let response = warp::test::request()
                .method("POST")
                .path(&format!("/play/{game_id}"))
                .header("authorization", &token)
                .json(&serde_json::json!({"guess": "ABOUT"}))
                .reply(&app)
                .await;
            assert_eq!(response.status(), 200);
        }

        // The fourth start of the day is rejected
        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .header("authorization", &token)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);

        let error: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(error["kind"], "daily_limit_exceeded");
        assert_eq!(error["limit"], 3);
    }

    #[tokio::test]
    async fn test_invalid_guess_rejected() {
        let (app, db) = create_test_app().await;
        seed_word(&db, "ABOUT").await;
        let token = player_token();

        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .header("authorization", &token)
            .reply(&app)
            .await;
        let view: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        let game_id = view["id"].as_str().unwrap().to_string();

        for bad in ["ab", "toolong", "ab0ut"] {
            let response = warp::test::request()
                .method("POST")
                .path(&format!("/play/{game_id}"))
                .header("authorization", &token)
                .json(&serde_json::json!({"guess": bad}))
                .reply(&app)
                .await;
            assert_eq!(response.status(), 400);

            let error: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
            assert_eq!(error["kind"], "invalid_guess_format");
        }

        // Rejected guesses consume no budget
        let response = warp::test::request()
            .method("GET")
            .path(&format!("/game/{game_id}"))
            .header("authorization", &token)
            .reply(&app)
            .await;
        let view: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(view["guesses_count"], 0);
    }

    #[tokio::test]
    async fn test_second_hint_gets_429() {
        let (app, db) = create_test_app().await;
        seed_word(&db, "ABOUT").await;
        let token = player_token();

        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .header("authorization", &token)
            .reply(&app)
            .await;
        let view: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        let game_id = view["id"].as_str().unwrap().to_string();

        let response = warp::test::request()
            .method("POST")
            .path(&format!("/play/{game_id}/hint"))
            .header("authorization", &token)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);

        let hint: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        let index = hint["index"].as_u64().unwrap() as usize;
        assert!(index < 5);
        assert_eq!(
            hint["letter"].as_str().unwrap(),
            "ABOUT".chars().nth(index).unwrap().to_string()
        );

        let response = warp::test::request()
            .method("POST")
            .path(&format!("/play/{game_id}/hint"))
            .header("authorization", &token)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 429);

        let error: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(error["kind"], "hint_already_used");
    }

    #[tokio::test]
    async fn test_foreign_game_reads_as_missing() {
        let (app, db) = create_test_app().await;
        seed_word(&db, "ABOUT").await;
        let alice = player_token();
        let bob = format!("Bearer {}:bob", Uuid::new_v4());

        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .header("authorization", &alice)
            .reply(&app)
            .await;
        let view: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        let game_id = view["id"].as_str().unwrap().to_string();

        let response = warp::test::request()
            .method("POST")
            .path(&format!("/play/{game_id}"))
            .header("authorization", &bob)
            .json(&serde_json::json!({"guess": "ABOUT"}))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 404);

        // Unknown ids too
        let response = warp::test::request()
            .method("GET")
            .path(&format!("/game/{}", Uuid::new_v4()))
            .header("authorization", &alice)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_start_game_with_empty_pool() {
        let (app, _db) = create_test_app().await;

        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .header("authorization", &player_token())
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);

        let error: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(error["kind"], "no_words_available");
    }

    #[tokio::test]
    async fn test_admin_endpoints_require_admin() {
        let (app, db) = create_test_app().await;
        let token = player_token();

        for path in [
            "/admin/dashboard",
            "/admin/reports/daily",
            "/admin/words",
        ] {
            let response = warp::test::request()
                .method("GET")
                .path(path)
                .header("authorization", &token)
                .reply(&app)
                .await;
            assert_eq!(response.status(), 403, "path {path}");
        }

        let admin = admin_token(&db).await;
        let response = warp::test::request()
            .method("GET")
            .path("/admin/dashboard")
            .header("authorization", &admin)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_admin_word_management() {
        let (app, db) = create_test_app().await;
        let admin = admin_token(&db).await;

        // Words are normalized on intake
        let response = warp::test::request()
            .method("POST")
            .path("/admin/words")
            .header("authorization", &admin)
            .json(&serde_json::json!({"word": "crane"}))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 201);

        let word: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(word["word"], "CRANE");
        let word_id = word["id"].as_str().unwrap().to_string();

        // Re-adding is not an error
        let response = warp::test::request()
            .method("POST")
            .path("/admin/words")
            .header("authorization", &admin)
            .json(&serde_json::json!({"word": "CRANE"}))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);

        // Malformed words are rejected
        let response = warp::test::request()
            .method("POST")
            .path("/admin/words")
            .header("authorization", &admin)
            .json(&serde_json::json!({"word": "abcdef"}))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);

        // Deactivate
        let response = warp::test::request()
            .method("PUT")
            .path(&format!("/admin/words/{word_id}"))
            .header("authorization", &admin)
            .json(&serde_json::json!({"is_active": false}))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);

        let word: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(word["is_active"], false);

        let response = warp::test::request()
            .method("PUT")
            .path(&format!("/admin/words/{}", Uuid::new_v4()))
            .header("authorization", &admin)
            .json(&serde_json::json!({"is_active": true}))
            .reply(&app)
            .await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_admin_reports() {
        let (app, db) = create_test_app().await;
        seed_word(&db, "ABOUT").await;
        let admin = admin_token(&db).await;
        let player_id = Uuid::new_v4();
        let token = format!("Bearer {player_id}:alice");

        // One completed game
        let response = warp::test::request()
            .method("POST")
            .path("/start-game")
            .header("authorization", &token)
            .reply(&app)
            .await;
        let view: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        let game_id = view["id"].as_str().unwrap().to_string();
        warp::test::request()
            .method("POST")
            .path(&format!("/play/{game_id}"))
            .header("authorization", &token)
            .json(&serde_json::json!({"guess": "ABOUT"}))
            .reply(&app)
            .await;

        let response = warp::test::request()
            .method("GET")
            .path("/admin/reports/daily")
            .header("authorization", &admin)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
        let report: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(report["total_games"], 1);
        assert_eq!(report["games_won"], 1);
        assert_eq!(report["users_count"], 1);

        let response = warp::test::request()
            .method("GET")
            .path("/admin/reports/daily?date=not-a-date")
            .header("authorization", &admin)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 400);

        let response = warp::test::request()
            .method("GET")
            .path(&format!("/admin/reports/users/{player_id}"))
            .header("authorization", &admin)
            .reply(&app)
            .await;
        assert_eq!(response.status(), 200);
        let report: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(report["total_games"], 1);
        assert_eq!(report["daily"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_http_endpoints_cors() {
        let (app, _db) = create_test_app().await;

        let response = warp::test::request()
            .method("OPTIONS")
            .path("/health")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "GET")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 200);
        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin")
        );
    }

    #[tokio::test]
    async fn test_invalid_routes() {
        let (app, _db) = create_test_app().await;

        let response = warp::test::request()
            .method("GET")
            .path("/invalid")
            .reply(&app)
            .await;

        assert_eq!(response.status(), 404);
    }
}
