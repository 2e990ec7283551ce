//! Stateless HTTP request builder and response parser for the blog API.
//!
//! # Design
//! `BlogClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The round trip itself happens elsewhere,
//! which keeps this module deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreatePost, ListPostsResponse, LoginRequest, Post, SearchPosts, UserWithToken};

/// Synchronous, stateless client for the blog API.
#[derive(Debug, Clone)]
pub struct BlogClient {
    base_url: String,
}

impl BlogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_login(&self, credentials: &LoginRequest) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "auth/login", credentials)
    }

    pub fn build_get_posts(&self) -> HttpRequest {
        self.bare_request(HttpMethod::Get, "auth/posts".to_string())
    }

    pub fn build_search_posts(&self, search: &SearchPosts) -> HttpRequest {
        self.bare_request(
            HttpMethod::Get,
            format!("auth/posts?skip={}&limit={}", search.skip, search.limit),
        )
    }

    pub fn build_get_post(&self, id: u64) -> HttpRequest {
        self.bare_request(HttpMethod::Get, format!("auth/posts/{id}"))
    }

    pub fn build_create_post(&self, input: &CreatePost) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "auth/posts/add", input)
    }

    /// Whole-resource replace: the full post, id included, is sent as the body.
    pub fn build_update_post(&self, post: &Post) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("auth/posts/{}", post.id), post)
    }

    pub fn build_delete_post(&self, id: u64) -> HttpRequest {
        self.bare_request(HttpMethod::Delete, format!("auth/posts/{id}"))
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<UserWithToken, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_posts(&self, response: HttpResponse) -> Result<ListPostsResponse, ApiError> {
        parse_json(response)
    }

    pub fn parse_search_posts(&self, response: HttpResponse) -> Result<ListPostsResponse, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response)
    }

    /// Any body the server sends back on delete is ignored.
    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn bare_request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}/{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}/{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BlogClient {
        BlogClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_login_produces_correct_request() {
        let credentials = LoginRequest {
            username: "emilys".to_string(),
            password: "emilyspass".to_string(),
        };
        let req = client().build_login(&credentials).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/auth/login");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username"], "emilys");
        assert_eq!(body["password"], "emilyspass");
    }

    #[test]
    fn build_get_posts_has_no_query() {
        let req = client().build_get_posts();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/auth/posts");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_search_posts_renders_skip_and_limit() {
        let req = client().build_search_posts(&SearchPosts { skip: 10, limit: 5 });
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/auth/posts?skip=10&limit=5");
    }

    #[test]
    fn build_get_post_uses_item_path() {
        let req = client().build_get_post(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/auth/posts/42");
    }

    #[test]
    fn build_create_post_posts_to_add() {
        let input = CreatePost {
            title: "A".to_string(),
            body: "B".to_string(),
            user_id: 1,
        };
        let req = client().build_create_post(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/auth/posts/add");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "A");
        assert_eq!(body["userId"], 1);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_post_sends_whole_resource() {
        let post = Post {
            id: 5,
            title: "New".to_string(),
            body: "Body".to_string(),
            user_id: 3,
        };
        let req = client().build_update_post(&post).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/auth/posts/5");
        let body: Post = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, post);
    }

    #[test]
    fn build_delete_post_produces_correct_request() {
        let req = client().build_delete_post(5);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/auth/posts/5");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_get_posts_preserves_server_order() {
        let body = r#"{"posts":[
            {"id":3,"title":"c","body":"","userId":1},
            {"id":1,"title":"a","body":"","userId":1}
        ],"total":2,"skip":0,"limit":30}"#;
        let list = client().parse_get_posts(response(200, body)).unwrap();
        let ids: Vec<u64> = list.posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(list.total, 2);
    }

    #[test]
    fn parse_get_post_not_found() {
        let err = client().parse_get_post(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_post_accepts_created() {
        let post = client()
            .parse_create_post(response(201, r#"{"id":5,"title":"A","body":"B","userId":1}"#))
            .unwrap();
        assert_eq!(post.id, 5);
    }

    #[test]
    fn parse_create_post_server_error() {
        let err = client()
            .parse_create_post(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, ref body } if body == "internal error"));
    }

    #[test]
    fn parse_login_rejected_credentials() {
        let err = client()
            .parse_login(response(400, r#"{"message":"Invalid credentials"}"#))
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn parse_delete_post_ignores_body() {
        assert!(client().parse_delete_post(response(204, "")).is_ok());
        assert!(client()
            .parse_delete_post(response(200, r#"{"id":5,"isDeleted":true}"#))
            .is_ok());
    }

    #[test]
    fn parse_delete_post_not_found() {
        let err = client().parse_delete_post(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_update_post_bad_json() {
        let err = client().parse_update_post(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = BlogClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.build_get_posts().path, "http://localhost:3000/auth/posts");
    }
}
