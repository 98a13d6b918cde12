//! Resource lookup by name

use elkar_core::Resource;
use elkar_core::dto::remote::Remote;
use tracing::debug;

use crate::error::Result;
use crate::repository::ResourceRepository;

/// Finds a stored resource by its human-assigned name
pub struct ResourceLocator<'a, P: ?Sized> {
    repo: &'a P,
}

impl<'a, P: ?Sized> ResourceLocator<'a, P> {
    pub fn new(repo: &'a P) -> Self {
        Self { repo }
    }

    /// Look up `name` with one list request
    ///
    /// # Returns
    /// - the only result, when the server returns exactly one
    /// - the result whose name is exactly `name`, when it returns several
    /// - `None` otherwise
    ///
    /// # Errors
    /// Transport failures propagate unchanged; nothing is retried.
    pub async fn find_by_name<R>(&self, name: &str) -> Result<Option<Remote<R>>>
    where
        R: Resource,
        P: ResourceRepository<R>,
    {
        let candidates = self.repo.list_by_name(name).await?;
        debug!(
            "{} lookup '{}' returned {} candidate(s)",
            R::KIND,
            name,
            candidates.len()
        );

        Ok(select_by_name(candidates, name))
    }
}

/// Pick the resource `name` refers to among the server's matches
///
/// The server's name filter may be a substring match, so several results are
/// narrowed down to the one with an exact, case-sensitive name.
pub(crate) fn select_by_name<R: Resource>(
    mut candidates: Vec<Remote<R>>,
    name: &str,
) -> Option<Remote<R>> {
    match candidates.len() {
        0 => None,
        1 => candidates.pop(),
        _ => candidates.into_iter().find(|c| c.name() == name),
    }
}
