//! Server-side SDK keys of an environment.

use crate::client::FlagsmithClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::ServerSideEnvKey;

impl<T: Transport> FlagsmithClient<T> {
    /// Server-side keys of an environment. This endpoint is not paginated.
    pub fn get_server_side_env_keys(&self, environment_key: &str) -> Result<Vec<ServerSideEnvKey>, ApiError> {
        self.get(&format!("/environments/{environment_key}/api-keys/"))
    }

    pub fn create_server_side_env_key(
        &self,
        environment_key: &str,
        key: &ServerSideEnvKey,
    ) -> Result<ServerSideEnvKey, ApiError> {
        self.send(
            HttpMethod::Post,
            &format!("/environments/{environment_key}/api-keys/"),
            key,
        )
    }

    pub fn update_server_side_env_key(
        &self,
        environment_key: &str,
        key: &ServerSideEnvKey,
    ) -> Result<ServerSideEnvKey, ApiError> {
        let key_id = key.id.ok_or(ApiError::MissingReference("server-side key"))?;
        self.send(
            HttpMethod::Put,
            &format!("/environments/{environment_key}/api-keys/{key_id}/"),
            key,
        )
    }

    pub fn delete_server_side_env_key(&self, environment_key: &str, key_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/environments/{environment_key}/api-keys/{key_id}/"))
    }
}
