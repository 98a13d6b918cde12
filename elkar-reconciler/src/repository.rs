//! Repository layer
//!
//! The reconciler talks to the server only through [`ResourceRepository`].
//! The HTTP implementation is a thin pass-through to [`ElkarClient`]; tests
//! plug in an in-memory backend that records every write.

use async_trait::async_trait;
use elkar_client::{ElkarClient, WriteOutcome};
use elkar_core::dto::remote::Remote;
use elkar_core::{Resource, ResourceId};

/// Remote operations for one resource kind
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// Lists resources whose name matches `name` (the match may be fuzzy)
    async fn list_by_name(&self, name: &str) -> elkar_client::Result<Vec<Remote<R>>>;

    /// Creates a resource, returning the assigned id or the rejection body
    async fn create(&self, resource: &R) -> elkar_client::Result<WriteOutcome<ResourceId>>;

    /// Replaces the stored object with `remote`
    async fn update(&self, remote: &Remote<R>) -> elkar_client::Result<WriteOutcome<ResourceId>>;

    /// Deletes a resource by id
    async fn delete(&self, id: ResourceId) -> elkar_client::Result<WriteOutcome<()>>;
}

#[async_trait]
impl<R: Resource> ResourceRepository<R> for ElkarClient {
    async fn list_by_name(&self, name: &str) -> elkar_client::Result<Vec<Remote<R>>> {
        ElkarClient::list_by_name::<R>(self, name).await
    }

    async fn create(&self, resource: &R) -> elkar_client::Result<WriteOutcome<ResourceId>> {
        ElkarClient::create(self, resource).await
    }

    async fn update(&self, remote: &Remote<R>) -> elkar_client::Result<WriteOutcome<ResourceId>> {
        ElkarClient::update(self, remote).await
    }

    async fn delete(&self, id: ResourceId) -> elkar_client::Result<WriteOutcome<()>> {
        ElkarClient::delete::<R>(self, id).await
    }
}
