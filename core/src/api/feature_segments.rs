//! Feature segments: the link between a feature, a segment and an
//! environment that orders segment overrides by priority.

use crate::client::FlagsmithClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{FeatureSegment, FeatureSegmentPriority};

impl<T: Transport> FlagsmithClient<T> {
    pub fn get_feature_segment_by_id(&self, feature_segment_id: i64) -> Result<FeatureSegment, ApiError> {
        self.get(&format!("/features/feature-segments/{feature_segment_id}/"))
    }

    pub fn create_feature_segment(&self, feature_segment: &FeatureSegment) -> Result<FeatureSegment, ApiError> {
        self.send(HttpMethod::Post, "/features/feature-segments/", feature_segment)
    }

    pub fn update_feature_segment_priority(&self, feature_segment_id: i64, priority: i64) -> Result<(), ApiError> {
        let body = [FeatureSegmentPriority {
            id: feature_segment_id,
            priority,
        }];
        self.send_discarding(
            HttpMethod::Post,
            "/features/feature-segments/update-priorities/",
            &body,
        )
    }

    pub fn delete_feature_segment(&self, feature_segment_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/features/feature-segments/{feature_segment_id}/"))
    }
}
