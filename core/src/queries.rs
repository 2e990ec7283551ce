//! Cached reads and cache-aware writes for posts.
//!
//! Reads go through `QueryCache::fetch` under their canonical key. Writes
//! call the resource client first and touch the cache only after it
//! succeeds:
//!
//! - create: the new post is stored under its id and prepended to the
//!   cached unfiltered list, if one exists. `total` is left as is.
//! - update: the item entry and the unfiltered list are marked stale, so
//!   their next readers refetch.
//! - delete: the item entry is removed and the post is filtered out of the
//!   cached unfiltered list.
//!
//! Every successful write also marks cached search windows stale. A failed
//! write returns its error and leaves the cache alone.

use std::sync::Arc;

use crate::api::BlogApi;
use crate::cache::{QueryCache, QueryKey};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CreatePost, ListPostsResponse, Post, SearchPosts};

#[derive(Debug)]
pub struct PostQueries<T> {
    api: Arc<BlogApi<T>>,
    cache: Arc<QueryCache>,
}

impl<T> Clone for PostQueries<T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<T: Transport> PostQueries<T> {
    pub fn new(api: BlogApi<T>, cache: Arc<QueryCache>) -> Self {
        Self::from_shared(Arc::new(api), cache)
    }

    pub fn from_shared(api: Arc<BlogApi<T>>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub fn api(&self) -> &BlogApi<T> {
        &self.api
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub async fn posts(&self) -> Result<ListPostsResponse, ApiError> {
        let api = &*self.api;
        self.cache
            .fetch(QueryKey::post_list(), move || api.get_posts())
            .await
    }

    pub async fn search_posts(&self, search: &SearchPosts) -> Result<ListPostsResponse, ApiError> {
        let api = &*self.api;
        self.cache
            .fetch(QueryKey::post_search(search), move || api.search_posts(search))
            .await
    }

    pub async fn post(&self, id: u64) -> Result<Post, ApiError> {
        let api = &*self.api;
        self.cache
            .fetch(QueryKey::post(id), move || api.get_post(id))
            .await
    }

    pub async fn create_post(&self, input: &CreatePost) -> Result<Post, ApiError> {
        let created = self.api.create_post(input).await?;

        self.cache.set(QueryKey::post(created.id), created.clone());
        let prepended = self
            .cache
            .update(&QueryKey::post_list(), |list: &ListPostsResponse| {
                let mut posts = Vec::with_capacity(list.posts.len() + 1);
                posts.push(created.clone());
                posts.extend(list.posts.iter().cloned());
                ListPostsResponse {
                    posts,
                    total: list.total,
                    skip: list.skip,
                    limit: list.limit,
                }
            });
        let searches = self.cache.invalidate_where(QueryKey::is_search);

        tracing::debug!(id = created.id, prepended, searches, "cached created post");
        Ok(created)
    }

    pub async fn update_post(&self, post: &Post) -> Result<Post, ApiError> {
        let updated = self.api.update_post(post).await?;

        self.cache.invalidate(&QueryKey::post(post.id));
        self.cache.invalidate(&QueryKey::post_list());
        let searches = self.cache.invalidate_where(QueryKey::is_search);

        tracing::debug!(id = post.id, searches, "invalidated updated post");
        Ok(updated)
    }

    pub async fn delete_post(&self, id: u64) -> Result<(), ApiError> {
        self.api.delete_post(id).await?;

        self.cache.remove(&QueryKey::post(id));
        let pruned = self
            .cache
            .update(&QueryKey::post_list(), |list: &ListPostsResponse| ListPostsResponse {
                posts: list.posts.iter().filter(|p| p.id != id).cloned().collect(),
                total: list.total,
                skip: list.skip,
                limit: list.limit,
            });
        let searches = self.cache.invalidate_where(QueryKey::is_search);

        tracing::debug!(id, pruned, searches, "evicted deleted post");
        Ok(())
    }
}
