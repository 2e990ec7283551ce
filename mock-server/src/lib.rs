use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const DEFAULT_LIMIT: u32 = 30;
pub const DEMO_USERNAME: &str = "emilys";
pub const DEMO_PASSWORD: &str = "emilyspass";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// Body of `POST /auth/posts/add` and `PUT /auth/posts/{id}`. Any `id` in
/// the body is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub user_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostList {
    pub posts: Vec<Post>,
    pub total: u64,
    pub skip: u32,
    pub limit: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct Page {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Store {
    posts: BTreeMap<u64, Post>,
    next_id: u64,
    users: Vec<(User, String)>,
    tokens: HashSet<String>,
}

impl Store {
    /// Empty post table and a single demo account.
    pub fn seeded() -> Self {
        let demo = User {
            id: 1,
            username: DEMO_USERNAME.to_string(),
            email: "emily.johnson@x.dummyjson.com".to_string(),
            first_name: "Emily".to_string(),
            last_name: "Johnson".to_string(),
        };
        Self {
            next_id: 1,
            users: vec![(demo, DEMO_PASSWORD.to_string())],
            ..Self::default()
        }
    }

    /// Posts in id order, windowed by `skip`/`limit`. A limit of 0 returns
    /// everything after `skip`.
    pub fn page(&self, page: &Page) -> PostList {
        let skip = page.skip.unwrap_or(0);
        let limit = page.limit.unwrap_or(DEFAULT_LIMIT);
        let window = self.posts.values().skip(skip as usize);
        let posts: Vec<Post> = if limit == 0 {
            window.cloned().collect()
        } else {
            window.take(limit as usize).cloned().collect()
        };
        PostList {
            limit: posts.len() as u32,
            posts,
            total: self.posts.len() as u64,
            skip,
        }
    }

    fn insert(&mut self, input: NewPost) -> Post {
        let post = Post {
            id: self.next_id,
            title: input.title,
            body: input.body,
            user_id: input.user_id,
        };
        self.next_id += 1;
        self.posts.insert(post.id, post.clone());
        post
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));

    let posts = Router::new()
        .route("/auth/posts", get(list_posts))
        .route("/auth/posts/add", post(create_post))
        .route(
            "/auth/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route_layer(middleware::from_fn_with_state(db.clone(), require_token));

    Router::new()
        .route("/auth/login", post(login))
        .merge(posts)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}

async fn require_token(State(db): State<Db>, request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    let authorized = match token {
        Some(token) => db.read().await.tokens.contains(&token),
        None => false,
    };
    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "Invalid or missing access token").into_response();
    }
    next.run(request).await
}

async fn login(
    State(db): State<Db>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorBody>)> {
    let mut store = db.write().await;
    let user = store
        .users
        .iter()
        .find(|(user, password)| user.username == credentials.username && *password == credentials.password)
        .map(|(user, _)| user.clone())
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Invalid credentials"))?;

    let access_token = Uuid::new_v4().to_string();
    store.tokens.insert(access_token.clone());
    tracing::info!(username = %user.username, "issued access token");
    Ok(Json(LoginResponse { user, access_token }))
}

async fn list_posts(State(db): State<Db>, Query(page): Query<Page>) -> Json<PostList> {
    Json(db.read().await.page(&page))
}

async fn create_post(State(db): State<Db>, Json(input): Json<NewPost>) -> (StatusCode, Json<Post>) {
    let post = db.write().await.insert(input);
    tracing::info!(id = post.id, "created post");
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    let store = db.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<NewPost>,
) -> Result<Json<Post>, StatusCode> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    post.title = input.title;
    post.body = input.body;
    post.user_id = input.user_id;
    Ok(Json(post.clone()))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.posts.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}
