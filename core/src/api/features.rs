//! Features and their owners.
//!
//! # Design
//! Feature paths are nested under a project, so create and update resolve
//! the project id from `project_uuid` when `project` is unset. Owners are
//! changed only through the dedicated add/remove endpoints.

use serde::Serialize;
use uuid::Uuid;

use crate::client::FlagsmithClient;
use crate::error::{ApiError, Resource};
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::Feature;

#[derive(Serialize)]
struct UserIds<'a> {
    user_ids: &'a [i64],
}

impl<T: Transport> FlagsmithClient<T> {
    /// Fetch a feature by UUID and fill in its project's UUID.
    pub fn get_feature(&self, feature_uuid: Uuid) -> Result<Feature, ApiError> {
        let mut feature: Feature = self.lookup(
            &format!("/features/get-by-uuid/{feature_uuid}/"),
            Resource::Feature,
            &feature_uuid.to_string(),
        )?;
        if let Some(project_id) = feature.project {
            feature.project_uuid = self.get_project_by_id(project_id)?.uuid;
        }
        Ok(feature)
    }

    /// Create a feature, resolving the project from `project_uuid` when
    /// `project` is not set.
    pub fn create_feature(&self, feature: &Feature) -> Result<Feature, ApiError> {
        let project_id = self.resolver().project_id(feature.project, feature.project_uuid)?;
        let payload = Feature {
            project: Some(project_id),
            ..feature.clone()
        };
        let created: Feature = self.send(
            HttpMethod::Post,
            &format!("/projects/{project_id}/features/"),
            &payload,
        )?;
        Ok(with_project(created, project_id, feature.project_uuid))
    }

    pub fn update_feature(&self, feature: &Feature) -> Result<Feature, ApiError> {
        let feature_id = feature.id.ok_or(ApiError::MissingReference("feature"))?;
        let project_id = self.resolver().project_id(feature.project, feature.project_uuid)?;
        let payload = Feature {
            project: Some(project_id),
            ..feature.clone()
        };
        let updated: Feature = self.send(
            HttpMethod::Put,
            &format!("/projects/{project_id}/features/{feature_id}/"),
            &payload,
        )?;
        Ok(with_project(updated, project_id, feature.project_uuid))
    }

    pub fn delete_feature(&self, project_id: i64, feature_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{project_id}/features/{feature_id}/"))
    }

    pub fn add_feature_owners(&self, feature: &Feature, user_ids: &[i64]) -> Result<(), ApiError> {
        self.change_owners(feature, "add-owners", user_ids)
    }

    pub fn remove_feature_owners(&self, feature: &Feature, user_ids: &[i64]) -> Result<(), ApiError> {
        self.change_owners(feature, "remove-owners", user_ids)
    }

    fn change_owners(&self, feature: &Feature, action: &str, user_ids: &[i64]) -> Result<(), ApiError> {
        let feature_id = feature.id.ok_or(ApiError::MissingReference("feature"))?;
        let project_id = self.resolver().project_id(feature.project, feature.project_uuid)?;
        self.send_discarding(
            HttpMethod::Post,
            &format!("/projects/{project_id}/features/{feature_id}/{action}/"),
            &UserIds { user_ids },
        )
    }
}

/// Re-attach the project reference the response may not carry.
fn with_project(mut feature: Feature, project_id: i64, project_uuid: Option<Uuid>) -> Feature {
    feature.project.get_or_insert(project_id);
    feature.project_uuid = project_uuid;
    feature
}
