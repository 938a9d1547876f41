//! Environments, addressed by their client-side API key.

use uuid::Uuid;

use crate::client::FlagsmithClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::Environment;

impl<T: Transport> FlagsmithClient<T> {
    pub fn get_environment(&self, api_key: &str) -> Result<Environment, ApiError> {
        self.get(&format!("/environments/{api_key}/"))
    }

    pub fn get_environment_by_uuid(&self, environment_uuid: Uuid) -> Result<Environment, ApiError> {
        self.get(&format!("/environments/get-by-uuid/{environment_uuid}/"))
    }

    pub fn create_environment(&self, environment: &Environment) -> Result<Environment, ApiError> {
        self.send(HttpMethod::Post, "/environments/", environment)
    }

    /// Environments are addressed by their API key, not their id.
    pub fn update_environment(&self, environment: &Environment) -> Result<Environment, ApiError> {
        if environment.api_key.is_empty() {
            return Err(ApiError::MissingReference("environment api key"));
        }
        self.send(
            HttpMethod::Put,
            &format!("/environments/{}/", environment.api_key),
            environment,
        )
    }

    pub fn delete_environment(&self, api_key: &str) -> Result<(), ApiError> {
        self.delete(&format!("/environments/{api_key}/"))
    }
}
