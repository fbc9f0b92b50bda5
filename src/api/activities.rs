//! Activity feed

use super::collection;
use crate::models::ActivityFilters;
use crate::services::client::PivotalClient;
use crate::services::request::{ApiRequest, Payload};
use crate::utils::error::ApiResult;
use crate::xml::Value;

impl PivotalClient {
    /// Activity across all accessible projects
    ///
    /// When `filters.project` is set the feed of that project is requested
    /// instead.
    pub async fn get_activities(&self, filters: &ActivityFilters) -> ApiResult<Vec<Value>> {
        let builder = match filters.project {
            Some(project_id) => ApiRequest::get()
                .segment("projects")
                .segment(project_id)
                .segment("activities"),
            None => ApiRequest::get().segment("activities"),
        };

        let request = builder
            .query_pairs(filters.to_query())
            .with_payload(Payload::Empty);
        Ok(collection(self.send(request).await?, "activity"))
    }

    pub async fn get_project_activities(
        &self,
        project_id: u64,
        filters: &ActivityFilters,
    ) -> ApiResult<Vec<Value>> {
        let filters = ActivityFilters {
            project: Some(project_id),
            ..filters.clone()
        };
        self.get_activities(&filters).await
    }
}
