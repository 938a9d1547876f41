//! Segments, nested under a project. Lookups by UUID fill in `project_uuid`.

use uuid::Uuid;

use crate::client::FlagsmithClient;
use crate::error::{ApiError, Resource};
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{Page, Segment};

impl<T: Transport> FlagsmithClient<T> {
    /// Fetch a segment by UUID and fill in its project's UUID.
    pub fn get_segment(&self, segment_uuid: Uuid) -> Result<Segment, ApiError> {
        let mut segment: Segment = self.lookup(
            &format!("/segments/get-by-uuid/{segment_uuid}/"),
            Resource::Segment,
            &segment_uuid.to_string(),
        )?;
        if let Some(project_id) = segment.project {
            segment.project_uuid = self.get_project_by_id(project_id)?.uuid;
        }
        Ok(segment)
    }

    /// First page of a project's segments.
    pub fn list_segments(&self, project_id: i64) -> Result<Vec<Segment>, ApiError> {
        let page: Page<Segment> = self.get(&format!("/projects/{project_id}/segments/"))?;
        Ok(page.results)
    }

    pub fn create_segment(&self, segment: &Segment) -> Result<Segment, ApiError> {
        let project_id = self.resolver().project_id(segment.project, segment.project_uuid)?;
        let payload = Segment {
            project: Some(project_id),
            ..segment.clone()
        };
        let mut created: Segment = self.send(
            HttpMethod::Post,
            &format!("/projects/{project_id}/segments/"),
            &payload,
        )?;
        created.project_uuid = segment.project_uuid;
        Ok(created)
    }

    pub fn update_segment(&self, segment: &Segment) -> Result<Segment, ApiError> {
        let segment_id = segment.id.ok_or(ApiError::MissingReference("segment"))?;
        let project_id = self.resolver().project_id(segment.project, segment.project_uuid)?;
        let payload = Segment {
            project: Some(project_id),
            ..segment.clone()
        };
        let mut updated: Segment = self.send(
            HttpMethod::Put,
            &format!("/projects/{project_id}/segments/{segment_id}/"),
            &payload,
        )?;
        updated.project_uuid = segment.project_uuid;
        Ok(updated)
    }

    pub fn delete_segment(&self, project_id: i64, segment_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{project_id}/segments/{segment_id}/"))
    }
}
