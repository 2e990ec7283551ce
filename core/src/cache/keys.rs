//! Canonical cache keys for the post resource.
//!
//! Every cached read maps to exactly one `QueryKey`, built from the
//! operation and its disambiguating parameters. The `Display` form is the
//! canonical string and is unique per key.

use std::fmt;

use crate::types::SearchPosts;

const POSTS: &str = "posts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The unfiltered list, `GET auth/posts`.
    PostList,
    /// One skip/limit window, `GET auth/posts?skip=&limit=`.
    PostSearch { skip: u32, limit: u32 },
    /// A single post by id.
    Post(u64),
}

impl QueryKey {
    pub fn post_list() -> Self {
        QueryKey::PostList
    }

    pub fn post_search(search: &SearchPosts) -> Self {
        QueryKey::PostSearch {
            skip: search.skip,
            limit: search.limit,
        }
    }

    pub fn post(id: u64) -> Self {
        QueryKey::Post(id)
    }

    /// Name of the server resource the key belongs to.
    pub fn resource(&self) -> &'static str {
        POSTS
    }

    pub fn is_search(&self) -> bool {
        matches!(self, QueryKey::PostSearch { .. })
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::PostList => write!(f, "{POSTS}/list"),
            QueryKey::PostSearch { skip, limit } => {
                write!(f, "{POSTS}/search?skip={skip}&limit={limit}")
            }
            QueryKey::Post(id) => write!(f, "{POSTS}/item/{id}"),
        }
    }
}
