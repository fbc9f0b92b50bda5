//! Story tasks

use super::collection;
use crate::models::TaskData;
use crate::services::client::PivotalClient;
use crate::services::request::{ApiRequest, Payload, RequestBuilder};
use crate::utils::error::ApiResult;
use crate::xml::{Fields, Value};

fn tasks(builder: RequestBuilder, project_id: u64, story_id: u64) -> RequestBuilder {
    builder
        .segment("projects")
        .segment(project_id)
        .segment("stories")
        .segment(story_id)
        .segment("tasks")
}

impl PivotalClient {
    pub async fn get_tasks(&self, project_id: u64, story_id: u64) -> ApiResult<Vec<Value>> {
        let request = tasks(ApiRequest::get(), project_id, story_id).with_payload(Payload::Empty);
        Ok(collection(self.send(request).await?, "task"))
    }

    pub async fn get_task(
        &self,
        project_id: u64,
        story_id: u64,
        task_id: u64,
    ) -> ApiResult<Option<Value>> {
        let request = tasks(ApiRequest::get(), project_id, story_id)
            .segment(task_id)
            .with_payload(Payload::Empty);
        self.send(request).await
    }

    pub async fn add_task(
        &self,
        project_id: u64,
        story_id: u64,
        data: &TaskData,
    ) -> ApiResult<Option<Value>> {
        let body = Fields::new().with("task", data.to_fields());
        let request =
            tasks(ApiRequest::post(), project_id, story_id).with_payload(Payload::Xml(body));
        self.send(request).await
    }

    pub async fn update_task(
        &self,
        project_id: u64,
        story_id: u64,
        task_id: u64,
        data: &TaskData,
    ) -> ApiResult<Option<Value>> {
        let body = Fields::new().with("task", data.to_fields());
        let request = tasks(ApiRequest::put(), project_id, story_id)
            .segment(task_id)
            .with_payload(Payload::Xml(body));
        self.send(request).await
    }

    pub async fn remove_task(
        &self,
        project_id: u64,
        story_id: u64,
        task_id: u64,
    ) -> ApiResult<Option<Value>> {
        let request = tasks(ApiRequest::delete(), project_id, story_id)
            .segment(task_id)
            .with_payload(Payload::Empty);
        self.send(request).await
    }
}
