//! Elkar Reconciler
//!
//! Brings Clients and Jobs on an Elkarbackup server to a desired state with
//! the fewest API calls, and reports whether anything changed.
//!
//! Architecture:
//! - Repository: trait seam over the REST client (HTTP in production, in-memory in tests)
//! - Locator: finds a stored resource by its human-assigned name
//! - Resolver: turns the Client name a Job refers to into a Client id
//! - Applier: issues exactly one create, update or delete
//! - Reconciler: the present/absent state machine tying the above together
//!
//! Each reconciliation reads remote state fresh and keeps nothing afterwards.

mod applier;
pub mod error;
mod locator;
mod reconciler;
pub mod repository;
mod resolver;
pub mod result;

#[cfg(test)]
mod mock;

pub use applier::Applier;
pub use error::{ReconcileError, Result};
pub use locator::ResourceLocator;
pub use reconciler::{Outcome, Reconciler};
pub use repository::ResourceRepository;
pub use resolver::ReferenceResolver;
pub use result::ReconcileResult;
