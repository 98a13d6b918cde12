//! Error types for reconciliation

use elkar_client::ClientError;
use elkar_core::ResourceKind;
use elkar_core::dto::error::StructuredError;
use thiserror::Error;

/// Result type alias for reconciliation steps
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// Everything that aborts a reconciliation
///
/// None of these are retried. Writes that already happened are not rolled back.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Network, status or decoding failure while talking to the server
    #[error("transport failure: {0}")]
    Transport(#[from] ClientError),

    /// The server answered a create without an id
    #[error("{kind} creation failed")]
    CreateFailed {
        kind: ResourceKind,
        api_result: StructuredError,
    },

    /// The server answered an update without an id
    #[error("{kind} update failed")]
    UpdateFailed {
        kind: ResourceKind,
        api_result: StructuredError,
    },

    /// The server refused a delete
    #[error("{kind} deletion failed")]
    DeleteFailed {
        kind: ResourceKind,
        api_result: StructuredError,
    },

    /// A Job names a Client that does not exist
    #[error("Client '{name}' referenced by the job was not found")]
    ReferenceNotFound {
        name: String,
        api_result: StructuredError,
    },

    /// A payload could not be built from the typed resources
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ReconcileError {
    pub fn reference_not_found(name: &str) -> Self {
        Self::ReferenceNotFound {
            name: name.to_string(),
            api_result: StructuredError::client_not_found(name),
        }
    }

    /// The structured detail reported to the caller
    ///
    /// API-level failures forward the server's body; local failures carry a
    /// synthesized one.
    pub fn api_result(&self) -> StructuredError {
        match self {
            Self::CreateFailed { api_result, .. }
            | Self::UpdateFailed { api_result, .. }
            | Self::DeleteFailed { api_result, .. }
            | Self::ReferenceNotFound { api_result, .. } => api_result.clone(),
            Self::Transport(err) => StructuredError::new("Transport failure", err.to_string()),
            Self::Payload(err) => StructuredError::new("Invalid payload", err.to_string()),
        }
    }
}
