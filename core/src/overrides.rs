//! Segment overrides: a feature state scoped to a segment in one
//! environment, together with the feature-segment link that places it.
//!
//! The server stores the two halves separately. Creating an override is
//! three calls (environment lookup, feature segment, feature state); a
//! failure part way through leaves whatever was already created in place.

use log::debug;

use crate::client::FlagsmithClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{FeatureSegment, FeatureState};

/// Which segment an override targets and where it ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPlacement {
    pub segment: i64,
    pub priority: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOverride {
    pub state: FeatureState,
    pub placement: SegmentPlacement,
}

impl SegmentOverride {
    pub fn merge(state: FeatureState, placement: SegmentPlacement) -> Self {
        Self { state, placement }
    }

    pub fn feature_segment(&self) -> Option<i64> {
        self.state.feature_segment
    }
}

impl<T: Transport> FlagsmithClient<T> {
    /// Create the feature segment for `placement`, then a feature state
    /// bound to it in the environment identified by `environment_key`.
    pub fn create_segment_override(
        &self,
        environment_key: &str,
        state: &FeatureState,
        placement: SegmentPlacement,
    ) -> Result<SegmentOverride, ApiError> {
        let environment = self.get_environment(environment_key)?;
        let environment_id = environment
            .id
            .ok_or(ApiError::MissingReference("environment"))?;

        let feature_segment = self.create_feature_segment(&FeatureSegment {
            id: None,
            uuid: None,
            feature: Some(state.feature),
            segment: placement.segment,
            environment: environment_id,
            priority: Some(placement.priority),
        })?;
        let feature_segment_id = feature_segment
            .id
            .ok_or(ApiError::MissingReference("feature segment"))?;
        debug!(
            "flagsmithapi: feature segment {feature_segment_id} created for segment {}",
            placement.segment
        );

        let created = self.create_feature_state(&FeatureState {
            environment: Some(environment_id),
            feature_segment: Some(feature_segment_id),
            ..state.clone()
        })?;
        Ok(SegmentOverride::merge(created, placement))
    }

    /// Update the override's feature state and, when `update_priority` is
    /// set, its segment priority. The returned override keeps the caller's
    /// placement since neither response carries it.
    pub fn update_segment_override(
        &self,
        segment_override: &SegmentOverride,
        update_priority: bool,
    ) -> Result<SegmentOverride, ApiError> {
        let updated = self.update_feature_state(&segment_override.state)?;
        if update_priority {
            if let Some(feature_segment) = segment_override.feature_segment() {
                self.update_feature_segment_priority(
                    feature_segment,
                    segment_override.placement.priority,
                )?;
            }
        }
        Ok(SegmentOverride::merge(updated, segment_override.placement))
    }
}
