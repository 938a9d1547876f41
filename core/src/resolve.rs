//! UUID-to-id resolution for path construction.
//!
//! Nested endpoints need numeric ids (`/projects/{id}/features/`), while
//! callers frequently hold only the stable UUID. The resolver returns the id
//! when it is already known and otherwise looks it up with one extra call.
//! A failed lookup aborts the calling operation with the lookup's error.

use uuid::Uuid;

use crate::client::FlagsmithClient;
use crate::error::ApiError;
use crate::transport::Transport;

/// Ids needed to address a feature's nested resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureIds {
    pub project: i64,
    pub feature: i64,
}

pub struct Resolver<'a, T> {
    client: &'a FlagsmithClient<T>,
}

impl<'a, T: Transport> Resolver<'a, T> {
    pub(crate) fn new(client: &'a FlagsmithClient<T>) -> Self {
        Self { client }
    }

    pub fn project_id(&self, id: Option<i64>, uuid: Option<Uuid>) -> Result<i64, ApiError> {
        if let Some(id) = id {
            return Ok(id);
        }
        let uuid = uuid.ok_or(ApiError::MissingReference("project"))?;
        let project = self.client.get_project(uuid)?;
        project.id.ok_or_else(|| {
            ApiError::DeserializationError(format!("project '{uuid}' has no id"))
        })
    }

    pub fn feature_ids(
        &self,
        project: Option<i64>,
        feature: Option<i64>,
        feature_uuid: Option<Uuid>,
    ) -> Result<FeatureIds, ApiError> {
        if let (Some(project), Some(feature)) = (project, feature) {
            return Ok(FeatureIds { project, feature });
        }
        let uuid = feature_uuid.ok_or(ApiError::MissingReference("feature"))?;
        let found = self.client.get_feature(uuid)?;
        match (found.project, found.id) {
            (Some(project), Some(feature)) => Ok(FeatureIds { project, feature }),
            _ => Err(ApiError::DeserializationError(format!(
                "feature '{uuid}' has no id or project"
            ))),
        }
    }
}
