//! Multivariate options, nested under a project's feature.

use uuid::Uuid;

use crate::client::FlagsmithClient;
use crate::error::{ApiError, Resource};
use crate::http::HttpMethod;
use crate::resolve::FeatureIds;
use crate::transport::Transport;
use crate::types::FeatureMultivariateOption;

impl<T: Transport> FlagsmithClient<T> {
    /// Fetch a multivariate option by UUID, then resolve its feature so the
    /// returned option carries the feature UUID and project id.
    pub fn get_feature_mv_option(
        &self,
        feature_uuid: Uuid,
        option_uuid: Uuid,
    ) -> Result<FeatureMultivariateOption, ApiError> {
        let option: FeatureMultivariateOption = self.lookup(
            &format!("/multivariate/options/get-by-uuid/{option_uuid}/"),
            Resource::FeatureMvOption,
            &option_uuid.to_string(),
        )?;
        let ids = self.resolver().feature_ids(None, None, Some(feature_uuid))?;
        Ok(with_feature(option, ids, Some(feature_uuid)))
    }

    pub fn create_feature_mv_option(
        &self,
        option: &FeatureMultivariateOption,
    ) -> Result<FeatureMultivariateOption, ApiError> {
        let ids = self
            .resolver()
            .feature_ids(option.project, option.feature, option.feature_uuid)?;
        let payload = FeatureMultivariateOption {
            feature: Some(ids.feature),
            ..option.clone()
        };
        let created = self.send(
            HttpMethod::Post,
            &format!("/projects/{}/features/{}/mv-options/", ids.project, ids.feature),
            &payload,
        )?;
        Ok(with_feature(created, ids, option.feature_uuid))
    }

    pub fn update_feature_mv_option(
        &self,
        option: &FeatureMultivariateOption,
    ) -> Result<FeatureMultivariateOption, ApiError> {
        let option_id = option.id.ok_or(ApiError::MissingReference("multivariate option"))?;
        let ids = self
            .resolver()
            .feature_ids(option.project, option.feature, option.feature_uuid)?;
        let payload = FeatureMultivariateOption {
            feature: Some(ids.feature),
            ..option.clone()
        };
        let updated = self.send(
            HttpMethod::Put,
            &format!(
                "/projects/{}/features/{}/mv-options/{option_id}/",
                ids.project, ids.feature
            ),
            &payload,
        )?;
        Ok(with_feature(updated, ids, option.feature_uuid))
    }

    pub fn delete_feature_mv_option(&self, project_id: i64, feature_id: i64, option_id: i64) -> Result<(), ApiError> {
        self.delete(&format!(
            "/projects/{project_id}/features/{feature_id}/mv-options/{option_id}/"
        ))
    }
}

fn with_feature(
    mut option: FeatureMultivariateOption,
    ids: FeatureIds,
    feature_uuid: Option<Uuid>,
) -> FeatureMultivariateOption {
    option.feature.get_or_insert(ids.feature);
    option.project = Some(ids.project);
    option.feature_uuid = feature_uuid;
    option
}
