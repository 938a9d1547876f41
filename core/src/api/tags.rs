//! Project tags.

use crate::client::FlagsmithClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{Page, Tag};

impl<T: Transport> FlagsmithClient<T> {
    /// First page of a project's tags.
    pub fn list_tags(&self, project_id: i64) -> Result<Vec<Tag>, ApiError> {
        let page: Page<Tag> = self.get(&format!("/projects/{project_id}/tags/"))?;
        Ok(page.results)
    }

    pub fn get_tag(&self, project_id: i64, tag_id: i64) -> Result<Tag, ApiError> {
        self.get(&format!("/projects/{project_id}/tags/{tag_id}/"))
    }

    pub fn create_tag(&self, tag: &Tag) -> Result<Tag, ApiError> {
        let project_id = self.resolver().project_id(tag.project, tag.project_uuid)?;
        let payload = Tag {
            project: Some(project_id),
            ..tag.clone()
        };
        let mut created: Tag = self.send(
            HttpMethod::Post,
            &format!("/projects/{project_id}/tags/"),
            &payload,
        )?;
        created.project_uuid = tag.project_uuid;
        Ok(created)
    }

    pub fn update_tag(&self, tag: &Tag) -> Result<Tag, ApiError> {
        let tag_id = tag.id.ok_or(ApiError::MissingReference("tag"))?;
        let project_id = self.resolver().project_id(tag.project, tag.project_uuid)?;
        let payload = Tag {
            project: Some(project_id),
            ..tag.clone()
        };
        let mut updated: Tag = self.send(
            HttpMethod::Put,
            &format!("/projects/{project_id}/tags/{tag_id}/"),
            &payload,
        )?;
        updated.project_uuid = tag.project_uuid;
        Ok(updated)
    }

    pub fn delete_tag(&self, project_id: i64, tag_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{project_id}/tags/{tag_id}/"))
    }
}
