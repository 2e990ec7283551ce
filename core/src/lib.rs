//! Client-side data access for the blog API.
//!
//! # Overview
//! Typed wrappers around the `auth` and `posts` endpoints, plus cached
//! bindings that keep a shared `QueryCache` consistent after writes.
//!
//! # Design
//! - `BlogClient` is stateless and sans-IO: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `Transport` performs the round trip; `ReqwestTransport` is the
//!   network-backed implementation and the only place a token is attached.
//! - `BlogApi` pairs the two into one async call per endpoint.
//! - `PostQueries` binds reads to cache keys and applies the post-write
//!   cache effects for create, update and delete.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod queries;
pub mod transport;
pub mod types;

#[cfg(test)]
mod mock;

pub use api::BlogApi;
pub use cache::{CacheEvent, EntryStatus, QueryCache, QueryConfig, QueryKey};
pub use client::BlogClient;
pub use crate::config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use queries::PostQueries;
pub use transport::{ReqwestTransport, Transport};
pub use types::{CreatePost, ListPostsResponse, LoginRequest, Post, SearchPosts, User, UserWithToken};
