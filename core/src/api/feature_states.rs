//! Feature states.
//!
//! # Design
//! The environment endpoint reports values as raw scalars, the
//! `/features/featurestates/` family as structured records. Both decode into
//! the same `FeatureState` through `FeatureStateValue`.

use uuid::Uuid;

use crate::client::FlagsmithClient;
use crate::error::{ApiError, Resource};
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{FeatureState, Page};

impl<T: Transport> FlagsmithClient<T> {
    pub fn get_feature_state(&self, feature_state_uuid: Uuid) -> Result<FeatureState, ApiError> {
        self.lookup(
            &format!("/features/featurestates/get-by-uuid/{feature_state_uuid}/"),
            Resource::FeatureState,
            &feature_state_uuid.to_string(),
        )
    }

    /// The environment default state of one feature. This endpoint reports
    /// values as raw scalars.
    pub fn get_environment_feature_state(
        &self,
        environment_key: &str,
        feature_id: i64,
    ) -> Result<FeatureState, ApiError> {
        let page: Page<FeatureState> = self.get(&format!(
            "/environments/{environment_key}/featurestates/?feature={feature_id}"
        ))?;
        let found = page.results.len();
        let mut results = page.results.into_iter();
        match (results.next(), found) {
            (Some(state), 1) => Ok(state),
            _ => Err(ApiError::UnexpectedResultCount { expected: 1, found }),
        }
    }

    /// First page of the feature states of an environment.
    pub fn list_feature_states(&self, environment_id: i64) -> Result<Vec<FeatureState>, ApiError> {
        let page: Page<FeatureState> =
            self.get(&format!("/features/featurestates/?environment={environment_id}"))?;
        Ok(page.results)
    }

    pub fn create_feature_state(&self, feature_state: &FeatureState) -> Result<FeatureState, ApiError> {
        self.send(HttpMethod::Post, "/features/featurestates/", feature_state)
    }

    pub fn update_feature_state(&self, feature_state: &FeatureState) -> Result<FeatureState, ApiError> {
        let id = feature_state
            .id
            .ok_or(ApiError::MissingReference("feature state"))?;
        self.send(
            HttpMethod::Put,
            &format!("/features/featurestates/{id}/"),
            feature_state,
        )
    }

    pub fn delete_feature_state(&self, feature_state_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/features/featurestates/{feature_state_id}/"))
    }
}
