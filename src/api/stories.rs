//! Stories, with their attachments, comments and priority moves

use super::collection;
use crate::models::{StoryData, StoryFilters, StoryMove};
use crate::services::client::PivotalClient;
use crate::services::request::{ApiRequest, FileUpload, Payload, RequestBuilder};
use crate::utils::error::ApiResult;
use crate::xml::{Fields, Value};

fn stories(builder: RequestBuilder, project_id: u64) -> RequestBuilder {
    builder
        .segment("projects")
        .segment(project_id)
        .segment("stories")
}

fn story(builder: RequestBuilder, project_id: u64, story_id: u64) -> RequestBuilder {
    stories(builder, project_id).segment(story_id)
}

impl PivotalClient {
    /// Stories of a project
    pub async fn get_stories(
        &self,
        project_id: u64,
        filters: &StoryFilters,
    ) -> ApiResult<Vec<Value>> {
        let request = stories(ApiRequest::get(), project_id)
            .query_pairs(filters.to_query())
            .with_payload(Payload::Empty);
        Ok(collection(self.send(request).await?, "story"))
    }

    pub async fn get_story(&self, project_id: u64, story_id: u64) -> ApiResult<Option<Value>> {
        let request = story(ApiRequest::get(), project_id, story_id).with_payload(Payload::Empty);
        self.send(request).await
    }

    pub async fn add_story(&self, project_id: u64, data: &StoryData) -> ApiResult<Option<Value>> {
        let body = Fields::new().with("story", data.to_fields());
        let request = stories(ApiRequest::post(), project_id).with_payload(Payload::Xml(body));
        self.send(request).await
    }

    /// Update a story
    ///
    /// Setting `data.project_id` moves the story into that project.
    pub async fn update_story(
        &self,
        project_id: u64,
        story_id: u64,
        data: &StoryData,
    ) -> ApiResult<Option<Value>> {
        let body = Fields::new().with("story", data.to_fields());
        let request =
            story(ApiRequest::put(), project_id, story_id).with_payload(Payload::Xml(body));
        self.send(request).await
    }

    /// Upload one file as a story attachment
    pub async fn add_story_attachment(
        &self,
        project_id: u64,
        story_id: u64,
        file: FileUpload,
    ) -> ApiResult<Option<Value>> {
        let request = story(ApiRequest::post(), project_id, story_id)
            .segment("attachments")
            .with_payload(Payload::File(file));
        self.send(request).await
    }

    pub async fn add_story_comment(
        &self,
        project_id: u64,
        story_id: u64,
        comment: &str,
    ) -> ApiResult<Option<Value>> {
        let body = Fields::new().with("note", Fields::new().with("text", comment));
        let request = story(ApiRequest::put(), project_id, story_id)
            .segment("notes")
            .with_payload(Payload::Xml(body));
        self.send(request).await
    }

    /// Move a story before or after another one in priority order
    pub async fn move_story(
        &self,
        project_id: u64,
        story_id: u64,
        movement: &StoryMove,
    ) -> ApiResult<Option<Value>> {
        let request = story(ApiRequest::post(), project_id, story_id)
            .segment("moves")
            .query_pairs(movement.to_query())
            .with_payload(Payload::Empty);
        self.send(request).await
    }

    pub async fn remove_story(&self, project_id: u64, story_id: u64) -> ApiResult<Option<Value>> {
        let request =
            story(ApiRequest::delete(), project_id, story_id).with_payload(Payload::Empty);
        self.send(request).await
    }

    /// Mark every finished story as delivered, returning those stories
    pub async fn deliver_all_finished_stories(&self, project_id: u64) -> ApiResult<Vec<Value>> {
        let request = stories(ApiRequest::put(), project_id)
            .segment("deliver_all_finished")
            .with_payload(Payload::Empty);
        Ok(collection(self.send(request).await?, "story"))
    }
}
