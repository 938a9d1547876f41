//! Projects.

use uuid::Uuid;

use crate::client::FlagsmithClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::Project;

impl<T: Transport> FlagsmithClient<T> {
    pub fn get_project(&self, project_uuid: Uuid) -> Result<Project, ApiError> {
        self.get(&format!("/projects/get-by-uuid/{project_uuid}/"))
    }

    pub fn get_project_by_id(&self, project_id: i64) -> Result<Project, ApiError> {
        self.get(&format!("/projects/{project_id}/"))
    }

    pub fn create_project(&self, project: &Project) -> Result<Project, ApiError> {
        self.send(HttpMethod::Post, "/projects/", project)
    }

    pub fn update_project(&self, project: &Project) -> Result<Project, ApiError> {
        let project_id = project.id.ok_or(ApiError::MissingReference("project"))?;
        self.send(HttpMethod::Put, &format!("/projects/{project_id}/"), project)
    }

    pub fn delete_project(&self, project_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{project_id}/"))
    }
}
