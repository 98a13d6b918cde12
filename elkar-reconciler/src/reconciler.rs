//! Present/absent state machine
//!
//! | desired | remote  | action                                   |
//! |---------|---------|------------------------------------------|
//! | present | missing | create the full payload                  |
//! | present | exists  | update the changed fields, if any        |
//! | absent  | missing | nothing                                  |
//! | absent  | exists  | delete by id                             |
//!
//! For a present Job the owning Client is resolved before anything else, so
//! an unknown Client aborts the run before the first write.

use elkar_core::domain::client::Client;
use elkar_core::domain::job::Job;
use elkar_core::dto::remote::Remote;
use elkar_core::dto::spec::{ClientSpec, DesiredState, JobSpec};
use elkar_core::{ChangeSet, Resource, ResourceId, diff, merge};
use tracing::info;

use crate::applier::Applier;
use crate::error::Result;
use crate::locator::ResourceLocator;
use crate::repository::ResourceRepository;
use crate::resolver::ReferenceResolver;
use crate::result::ReconcileResult;

/// What a successful reconciliation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Remote state already matched
    Unchanged,
    Created(ResourceId),
    Updated { id: ResourceId, changes: ChangeSet },
    Deleted(ResourceId),
}

/// Reconciles Clients and Jobs against one server
pub struct Reconciler<A> {
    api: A,
}

impl<A> Reconciler<A>
where
    A: ResourceRepository<Client> + ResourceRepository<Job>,
{
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Reconcile one Client and render the result
    pub async fn reconcile_client(&self, spec: &ClientSpec) -> ReconcileResult {
        self.try_reconcile_client(spec).await.into()
    }

    /// Reconcile one Job and render the result
    pub async fn reconcile_job(&self, spec: &JobSpec) -> ReconcileResult {
        self.try_reconcile_job(spec).await.into()
    }

    pub async fn try_reconcile_client(&self, spec: &ClientSpec) -> Result<Outcome> {
        info!("Reconciling client '{}' (state={})", spec.name(), spec.state);

        let desired = match spec.state {
            DesiredState::Present => Some(&spec.client),
            DesiredState::Absent => None,
        };

        converge(&self.api, spec.name(), desired).await
    }

    pub async fn try_reconcile_job(&self, spec: &JobSpec) -> Result<Outcome> {
        info!("Reconciling job '{}' (state={})", spec.name(), spec.state);

        match spec.state {
            DesiredState::Present => {
                let client = ReferenceResolver::new(&self.api)
                    .resolve_client(&spec.client_name)
                    .await?;
                let job = spec.bind(client);
                converge(&self.api, spec.name(), Some(&job)).await
            }
            DesiredState::Absent => converge::<Job, _>(&self.api, spec.name(), None).await,
        }
    }
}

/// Run lookup → diff → apply for one resource
///
/// `desired` is `None` when the resource should be absent.
async fn converge<R, P>(repo: &P, name: &str, desired: Option<&R>) -> Result<Outcome>
where
    R: Resource,
    P: ResourceRepository<R> + ?Sized,
{
    let current: Option<Remote<R>> = ResourceLocator::new(repo).find_by_name::<R>(name).await?;
    let applier = Applier::new(repo);

    match (desired, current) {
        (Some(desired), None) => {
            info!("{} '{}' missing, creating", R::KIND, name);
            let id = applier.create(desired).await?;
            Ok(Outcome::Created(id))
        }
        (Some(desired), Some(remote)) => {
            let changes = diff(desired, &remote.resource)?;
            if changes.is_empty() {
                info!("{} '{}' (id {}) up to date", R::KIND, name, remote.id);
                return Ok(Outcome::Unchanged);
            }

            info!(
                "{} '{}' (id {}) differs in: {}",
                R::KIND,
                name,
                remote.id,
                changes
            );
            let updated = merge(&remote, desired, &changes)?;
            let id = applier.update(&updated).await?;
            Ok(Outcome::Updated { id, changes })
        }
        (None, Some(remote)) => {
            info!("{} '{}' (id {}) present, deleting", R::KIND, name, remote.id);
            applier.delete::<R>(remote.id).await?;
            Ok(Outcome::Deleted(remote.id))
        }
        (None, None) => {
            info!("{} '{}' already absent", R::KIND, name);
            Ok(Outcome::Unchanged)
        }
    }
}
