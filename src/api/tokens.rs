//! Credential exchange

use crate::services::client::PivotalClient;
use crate::services::request::{ApiRequest, Payload};
use crate::utils::error::ApiResult;
use crate::xml::Value;

impl PivotalClient {
    /// Exchange a username and password for an API token
    ///
    /// The credentials travel as a form-encoded body. The returned `<token>`
    /// structure carries the token in its `guid` field; it is not installed
    /// on this client, call [`use_token`](Self::use_token) for that.
    pub async fn get_token(&self, user: &str, pass: &str) -> ApiResult<Option<Value>> {
        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("username", user)
            .append_pair("password", pass)
            .finish();

        let request = ApiRequest::post()
            .segments(["tokens", "active"])
            .with_payload(Payload::Raw(form));
        self.send(request).await
    }
}
