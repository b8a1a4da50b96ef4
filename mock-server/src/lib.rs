use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub use axum::http::StatusCode;

pub const RESOURCE_PATH: &str = "/api/v1/interaction";
pub const SESSION_COOKIE: &str = "session";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub score: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub post_id: i64,
    pub score: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdQuery {
    pub post_id: String,
}

/// Status overrides for exercising client failure paths.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockOptions {
    /// Returned by every POST instead of storing the vote.
    pub write_status: Option<StatusCode>,
    /// Returned by a successful DELETE instead of 200.
    pub delete_status: Option<StatusCode>,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    by_post_and_user: HashMap<(i64, i64), Interaction>,
}

#[derive(Clone)]
struct AppState {
    store: Arc<RwLock<Store>>,
    options: MockOptions,
}

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    app_with(MockOptions::default())
}

pub fn app_with(options: MockOptions) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store::default())),
        options,
    };
    Router::new()
        .route(
            RESOURCE_PATH,
            get(list_interactions).post(add_interaction).delete(remove_interaction),
        )
        .route(&format!("{RESOURCE_PATH}/{{post_id}}"), get(get_interaction))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, options: MockOptions) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(options)).await
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

/// The voter is whoever the `session=<userId>` cookie names.
fn session_user(headers: &HeaderMap) -> ApiResult<i64> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "user not logged in"))
}

/// An empty value means no posts, not a malformed query.
fn parse_post_ids(raw: &str) -> ApiResult<Vec<i64>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|id| id.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .map_err(|_| error(StatusCode::BAD_REQUEST, "invalid postId"))
}

async fn get_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(post_id): Path<i64>,
) -> ApiResult<Json<Interaction>> {
    let user_id = session_user(&headers)?;
    let store = state.store.read().await;
    store
        .by_post_and_user
        .get(&(post_id, user_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "interaction not found"))
}

async fn list_interactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PostIdQuery>,
) -> ApiResult<Json<Vec<Interaction>>> {
    let user_id = session_user(&headers)?;
    let post_ids = parse_post_ids(&query.post_id)?;
    let store = state.store.read().await;
    let found = post_ids
        .iter()
        .filter_map(|post_id| store.by_post_and_user.get(&(*post_id, user_id)).cloned())
        .collect();
    Ok(Json(found))
}

async fn add_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(vote): Json<Vote>,
) -> ApiResult<Json<Interaction>> {
    let user_id = session_user(&headers)?;
    if let Some(status) = state.options.write_status {
        return Err(error(status, "write rejected"));
    }

    let mut guard = state.store.write().await;
    let store = &mut *guard;
    let key = (vote.post_id, user_id);
    let interaction = match store.by_post_and_user.get_mut(&key) {
        Some(existing) => {
            existing.score = vote.score;
            existing.clone()
        }
        None => {
            store.next_id += 1;
            let interaction = Interaction {
                id: store.next_id,
                post_id: vote.post_id,
                user_id,
                score: vote.score,
            };
            store.by_post_and_user.insert(key, interaction.clone());
            interaction
        }
    };
    tracing::info!(post_id = vote.post_id, user_id, score = vote.score, "vote stored");
    Ok(Json(interaction))
}

async fn remove_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PostIdQuery>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let user_id = session_user(&headers)?;
    let post_id: i64 = query
        .post_id
        .trim()
        .parse()
        .map_err(|_| error(StatusCode::BAD_REQUEST, "invalid postId"))?;

    let mut store = state.store.write().await;
    store
        .by_post_and_user
        .remove(&(post_id, user_id))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "interaction not found"))?;
    tracing::info!(post_id, user_id, "vote removed");

    let status = state.options.delete_status.unwrap_or(StatusCode::OK);
    Ok((status, Json(json!({ "message": "interaction deleted" }))))
}
