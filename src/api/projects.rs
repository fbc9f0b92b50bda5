//! Projects

use super::collection;
use crate::models::NewProject;
use crate::services::client::PivotalClient;
use crate::services::request::{ApiRequest, Payload};
use crate::utils::error::ApiResult;
use crate::xml::{Fields, Value};

impl PivotalClient {
    /// All projects the token has access to
    pub async fn get_projects(&self) -> ApiResult<Vec<Value>> {
        let request = ApiRequest::get()
            .segment("projects")
            .with_payload(Payload::Empty);
        Ok(collection(self.send(request).await?, "project"))
    }

    pub async fn get_project(&self, project_id: u64) -> ApiResult<Option<Value>> {
        let request = ApiRequest::get()
            .segment("projects")
            .segment(project_id)
            .with_payload(Payload::Empty);
        self.send(request).await
    }

    /// Create a project
    pub async fn add_project(&self, project: &NewProject) -> ApiResult<Option<Value>> {
        let body = Fields::new().with("project", project.to_fields());
        let request = ApiRequest::post()
            .segment("projects")
            .with_payload(Payload::Xml(body));
        self.send(request).await
    }
}
