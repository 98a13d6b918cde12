//! Resource endpoints
//!
//! The four operations the reconciler needs, shared by every resource kind:
//! list by name, create, full-object update and delete.

use elkar_core::dto::error::StructuredError;
use elkar_core::dto::remote::Remote;
use elkar_core::{Resource, ResourceId};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::ElkarClient;
use crate::error::Result;

/// What the server made of a write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome<T> {
    /// The write took effect
    Accepted(T),
    /// The server answered without the success marker; its error body is kept verbatim
    Rejected(StructuredError),
}

impl ElkarClient {
    // =============================================================================
    // Reads
    // =============================================================================

    /// List the resources whose name matches `name`
    ///
    /// The server-side filter is not guaranteed to be exact; callers must
    /// disambiguate.
    pub async fn list_by_name<R: Resource>(&self, name: &str) -> Result<Vec<Remote<R>>> {
        let url = self.collection_url(R::KIND.collection());
        debug!("GET {} name={}", url, name);

        let response = self
            .request(Method::GET, &url)
            .query(&[("name", name)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Writes
    // =============================================================================

    /// Create a resource
    ///
    /// # Returns
    /// The id assigned by the server, or the rejection body when the response
    /// carries no id
    pub async fn create<R: Resource>(&self, resource: &R) -> Result<WriteOutcome<ResourceId>> {
        let url = self.collection_url(R::KIND.collection());
        debug!("POST {} name={}", url, resource.name());

        self.send_write(Method::POST, &url, resource).await
    }

    /// Replace a stored resource with `remote`
    ///
    /// The whole object is sent, including fields outside the typed schema.
    pub async fn update<R: Resource>(&self, remote: &Remote<R>) -> Result<WriteOutcome<ResourceId>> {
        let url = self.item_url(R::KIND.collection(), remote.id);
        debug!("PUT {} name={}", url, remote.name());

        self.send_write(Method::PUT, &url, remote).await
    }

    /// Delete a resource by id
    pub async fn delete<R: Resource>(&self, id: ResourceId) -> Result<WriteOutcome<()>> {
        let url = self.item_url(R::KIND.collection(), id);
        debug!("DELETE {}", url);

        let response = self.request(Method::DELETE, &url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(WriteOutcome::Accepted(()));
        }

        let body = response.text().await.unwrap_or_default();
        Ok(WriteOutcome::Rejected(StructuredError::from_body(
            status.as_u16(),
            &body,
        )))
    }

    async fn send_write<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<WriteOutcome<ResourceId>> {
        let response = self.request(method, url).json(body).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(parse_write_body(status, &text))
    }
}

/// Interpret the body of a create/update response
///
/// Success is signalled by a non-zero `id` in the returned object, whatever
/// the status code says.
pub(crate) fn parse_write_body(status: u16, body: &str) -> WriteOutcome<ResourceId> {
    let id = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("id").and_then(id_from_value));

    match id {
        Some(id) if id != 0 => WriteOutcome::Accepted(id),
        _ => WriteOutcome::Rejected(StructuredError::from_body(status, body)),
    }
}

fn id_from_value(value: &Value) -> Option<ResourceId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
