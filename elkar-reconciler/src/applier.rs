//! Write operations
//!
//! Each call issues exactly one request and turns a rejected write into the
//! matching [`ReconcileError`], keeping the server's error body.

use elkar_client::WriteOutcome;
use elkar_core::dto::remote::Remote;
use elkar_core::{Resource, ResourceId};
use tracing::{info, warn};

use crate::error::{ReconcileError, Result};
use crate::repository::ResourceRepository;

/// Issues create, update and delete requests for one resource
pub struct Applier<'a, P: ?Sized> {
    repo: &'a P,
}

impl<'a, P: ?Sized> Applier<'a, P> {
    pub fn new(repo: &'a P) -> Self {
        Self { repo }
    }

    /// Create `resource`, returning the id the server assigned
    pub async fn create<R>(&self, resource: &R) -> Result<ResourceId>
    where
        R: Resource,
        P: ResourceRepository<R>,
    {
        match self.repo.create(resource).await? {
            WriteOutcome::Accepted(id) => {
                info!("{} '{}' created with id {}", R::KIND, resource.name(), id);
                Ok(id)
            }
            WriteOutcome::Rejected(api_result) => {
                warn!("{} '{}' creation rejected: {}", R::KIND, resource.name(), api_result);
                Err(ReconcileError::CreateFailed {
                    kind: R::KIND,
                    api_result,
                })
            }
        }
    }

    /// Replace the stored object with `remote`
    pub async fn update<R>(&self, remote: &Remote<R>) -> Result<ResourceId>
    where
        R: Resource,
        P: ResourceRepository<R>,
    {
        match self.repo.update(remote).await? {
            WriteOutcome::Accepted(id) => {
                info!("{} '{}' updated (id {})", R::KIND, remote.name(), id);
                Ok(id)
            }
            WriteOutcome::Rejected(api_result) => {
                warn!("{} '{}' update rejected: {}", R::KIND, remote.name(), api_result);
                Err(ReconcileError::UpdateFailed {
                    kind: R::KIND,
                    api_result,
                })
            }
        }
    }

    /// Delete the resource with `id`
    pub async fn delete<R>(&self, id: ResourceId) -> Result<()>
    where
        R: Resource,
        P: ResourceRepository<R>,
    {
        match self.repo.delete(id).await? {
            WriteOutcome::Accepted(()) => {
                info!("{} {} deleted", R::KIND, id);
                Ok(())
            }
            WriteOutcome::Rejected(api_result) => {
                warn!("{} {} deletion rejected: {}", R::KIND, id, api_result);
                Err(ReconcileError::DeleteFailed {
                    kind: R::KIND,
                    api_result,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MemoryBackend, Write};
    use elkar_core::ResourceKind;
    use elkar_core::domain::client::Client;
    use elkar_core::dto::error::StructuredError;

    #[tokio::test]
    async fn test_create_returns_id() {
        let backend = MemoryBackend::new();
        let applier = Applier::new(&backend);

        let id = applier.create(&Client::new("Name1")).await.unwrap();

        assert_eq!(
            backend.writes(),
            vec![Write::Create {
                kind: ResourceKind::Client,
                name: "Name1".to_string()
            }]
        );
        assert_eq!(backend.get::<Client>(id).map(|c| c.resource.name), Some("Name1".to_string()));
    }

    #[tokio::test]
    async fn test_create_rejected_keeps_body() {
        let backend = MemoryBackend::new();
        let body = StructuredError::new("An error occurred", "Script \"1\" is not a client pre script");
        backend.reject_writes(body.clone());

        let err = Applier::new(&backend)
            .create(&Client::new("Name1"))
            .await
            .unwrap_err();

        match err {
            ReconcileError::CreateFailed { kind, api_result } => {
                assert_eq!(kind, ResourceKind::Client);
                assert_eq!(api_result, body);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_update_rejected() {
        let backend = MemoryBackend::new();
        let id = backend.seed(Client::new("Name1"));
        backend.reject_writes(StructuredError::new("t", "d"));

        let remote = backend.get::<Client>(id).unwrap();
        let err = Applier::new(&backend).update(&remote).await.unwrap_err();

        assert!(matches!(err, ReconcileError::UpdateFailed { .. }));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_fails() {
        let backend = MemoryBackend::new();

        let err = Applier::new(&backend).delete::<Client>(42).await.unwrap_err();

        match err {
            ReconcileError::DeleteFailed { api_result, .. } => {
                assert_eq!(api_result.title, "HTTP 404");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(backend.writes().len(), 1);
    }
}
