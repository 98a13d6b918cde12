//! Cross-resource reference resolution

use elkar_core::ResourceId;
use elkar_core::domain::client::Client;
use tracing::{debug, warn};

use crate::error::{ReconcileError, Result};
use crate::locator::ResourceLocator;
use crate::repository::ResourceRepository;

/// Resolves the Client a Job belongs to
pub struct ReferenceResolver<'a, P: ?Sized> {
    locator: ResourceLocator<'a, P>,
}

impl<'a, P> ReferenceResolver<'a, P>
where
    P: ResourceRepository<Client> + ?Sized,
{
    pub fn new(repo: &'a P) -> Self {
        Self {
            locator: ResourceLocator::new(repo),
        }
    }

    /// Resolve a Client name to its id
    ///
    /// Uses the same disambiguation as any lookup by name.
    ///
    /// # Errors
    /// [`ReconcileError::ReferenceNotFound`] when no Client has that name.
    pub async fn resolve_client(&self, name: &str) -> Result<ResourceId> {
        match self.locator.find_by_name::<Client>(name).await? {
            Some(client) => {
                debug!("Client '{}' resolved to id {}", name, client.id);
                Ok(client.id)
            }
            None => {
                warn!("Client '{}' not found", name);
                Err(ReconcileError::reference_not_found(name))
            }
        }
    }
}
