//! Project memberships

use super::collection;
use crate::models::NewMembership;
use crate::services::client::PivotalClient;
use crate::services::request::{ApiRequest, Payload, RequestBuilder};
use crate::utils::error::ApiResult;
use crate::xml::{Fields, Value};

fn memberships(builder: RequestBuilder, project_id: u64) -> RequestBuilder {
    builder
        .segment("projects")
        .segment(project_id)
        .segment("memberships")
}

impl PivotalClient {
    pub async fn get_memberships(&self, project_id: u64) -> ApiResult<Vec<Value>> {
        let request = memberships(ApiRequest::get(), project_id).with_payload(Payload::Empty);
        Ok(collection(self.send(request).await?, "membership"))
    }

    pub async fn get_membership(
        &self,
        project_id: u64,
        membership_id: u64,
    ) -> ApiResult<Option<Value>> {
        let request = memberships(ApiRequest::get(), project_id)
            .segment(membership_id)
            .with_payload(Payload::Empty);
        self.send(request).await
    }

    /// Invite a person into a project
    pub async fn add_membership(
        &self,
        project_id: u64,
        membership: &NewMembership,
    ) -> ApiResult<Option<Value>> {
        let body = Fields::new().with("membership", membership.to_fields());
        let request = memberships(ApiRequest::post(), project_id).with_payload(Payload::Xml(body));
        self.send(request).await
    }

    pub async fn remove_membership(
        &self,
        project_id: u64,
        membership_id: u64,
    ) -> ApiResult<Option<Value>> {
        let request = memberships(ApiRequest::delete(), project_id)
            .segment(membership_id)
            .with_payload(Payload::Empty);
        self.send(request).await
    }
}
