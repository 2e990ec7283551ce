use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{LoginRequest, UserWithToken};

use super::BlogApi;

impl<T: Transport> BlogApi<T> {
    /// `POST auth/login`. Credentials are sent as given.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<UserWithToken, ApiError> {
        let request = self.client.build_login(credentials)?;
        let response = self.send(request).await?;
        self.client.parse_login(response)
    }
}
