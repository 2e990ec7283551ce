use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CreatePost, ListPostsResponse, Post, SearchPosts};

use super::BlogApi;

impl<T: Transport> BlogApi<T> {
    /// First page of posts, as the server pages by default.
    pub async fn get_posts(&self) -> Result<ListPostsResponse, ApiError> {
        let response = self.send(self.client.build_get_posts()).await?;
        self.client.parse_get_posts(response)
    }

    pub async fn search_posts(&self, search: &SearchPosts) -> Result<ListPostsResponse, ApiError> {
        let response = self.send(self.client.build_search_posts(search)).await?;
        self.client.parse_search_posts(response)
    }

    pub async fn get_post(&self, id: u64) -> Result<Post, ApiError> {
        let response = self.send(self.client.build_get_post(id)).await?;
        self.client.parse_get_post(response)
    }

    pub async fn create_post(&self, input: &CreatePost) -> Result<Post, ApiError> {
        let request = self.client.build_create_post(input)?;
        let response = self.send(request).await?;
        self.client.parse_create_post(response)
    }

    pub async fn update_post(&self, post: &Post) -> Result<Post, ApiError> {
        let request = self.client.build_update_post(post)?;
        let response = self.send(request).await?;
        self.client.parse_update_post(response)
    }

    pub async fn delete_post(&self, id: u64) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_post(id)).await?;
        self.client.parse_delete_post(response)
    }
}
