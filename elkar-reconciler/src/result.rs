//! Reconciliation result

use elkar_core::ResourceId;
use elkar_core::dto::error::StructuredError;
use serde::Serialize;

use crate::error::ReconcileError;
use crate::reconciler::Outcome;

/// The sole output of one reconciliation
///
/// Serializes to the map callers consume: `changed` always, `id` only after a
/// successful create or update, and `failed`/`msg`/`api_result` only on
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileResult {
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_result: Option<StructuredError>,
}

impl ReconcileResult {
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            id: None,
            failed: false,
            msg: None,
            api_result: None,
        }
    }

    pub fn changed(id: Option<ResourceId>) -> Self {
        Self {
            changed: true,
            id,
            ..Self::unchanged()
        }
    }

    /// A failed reconciliation: nothing is reported as changed
    pub fn failure(err: &ReconcileError) -> Self {
        Self {
            failed: true,
            msg: Some(err.to_string()),
            api_result: Some(err.api_result()),
            ..Self::unchanged()
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failed
    }
}

impl From<Outcome> for ReconcileResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Unchanged => Self::unchanged(),
            Outcome::Created(id) | Outcome::Updated { id, .. } => Self::changed(Some(id)),
            Outcome::Deleted(_) => Self::changed(None),
        }
    }
}

impl From<crate::error::Result<Outcome>> for ReconcileResult {
    fn from(result: crate::error::Result<Outcome>) -> Self {
        match result {
            Ok(outcome) => outcome.into(),
            Err(err) => Self::failure(&err),
        }
    }
}
