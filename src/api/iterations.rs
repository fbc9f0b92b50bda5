//! Iterations

use super::collection;
use crate::models::{IterationFilters, IterationGroup};
use crate::services::client::PivotalClient;
use crate::services::request::{ApiRequest, Payload};
use crate::utils::error::ApiResult;
use crate::xml::Value;

impl PivotalClient {
    /// Iterations of a project, optionally one group of them
    pub async fn get_iterations(
        &self,
        project_id: u64,
        filters: &IterationFilters,
    ) -> ApiResult<Vec<Value>> {
        let mut builder = ApiRequest::get()
            .segment("projects")
            .segment(project_id)
            .segment("iterations");
        if let Some(group) = filters.group {
            builder = builder.segment(group);
        }

        let request = builder
            .query_pairs(filters.to_query())
            .with_payload(Payload::Empty);
        Ok(collection(self.send(request).await?, "iteration"))
    }

    /// The iteration in progress, if any
    pub async fn get_current_iteration(&self, project_id: u64) -> ApiResult<Option<Value>> {
        let filters = IterationFilters::new().group(IterationGroup::Current);
        let iterations = self.get_iterations(project_id, &filters).await?;
        Ok(iterations.into_iter().next())
    }

    pub async fn get_done_iterations(&self, project_id: u64) -> ApiResult<Vec<Value>> {
        self.get_group(project_id, IterationGroup::Done).await
    }

    pub async fn get_backlog_iterations(&self, project_id: u64) -> ApiResult<Vec<Value>> {
        self.get_group(project_id, IterationGroup::Backlog).await
    }

    pub async fn get_current_backlog_iterations(&self, project_id: u64) -> ApiResult<Vec<Value>> {
        self.get_group(project_id, IterationGroup::CurrentBacklog).await
    }

    async fn get_group(&self, project_id: u64, group: IterationGroup) -> ApiResult<Vec<Value>> {
        let filters = IterationFilters::new().group(group);
        self.get_iterations(project_id, &filters).await
    }
}
