//! Store error handling
//!
//! Typed errors for the point operations. Each variant has a stable message
//! so the presentation layer can tell the traveler what went wrong.

use thiserror::Error;

use crate::models::PointId;
use crate::transport::TransportError;

/// Errors returned by the point operations of [`crate::TripStore`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TripError {
    /// Update targeted an id that is not in the store
    #[error("Unable to update a non-existent point")]
    UpdateMissing { id: PointId },

    /// Delete targeted an id that is not in the store
    #[error("Unable to delete a non-existent point")]
    DeleteMissing { id: PointId },

    /// The server accepted the update, but the point was deleted locally
    /// before the answer arrived
    #[error("The point was deleted before its update completed")]
    UpdateTargetRemoved { id: PointId },

    /// The server refused or failed the update
    #[error("The point cannot be updated")]
    UpdateRejected {
        #[source]
        source: TransportError,
    },

    /// The server refused or failed the creation
    #[error("The point cannot be added")]
    AddRejected {
        #[source]
        source: TransportError,
    },

    /// The server refused or failed the deletion
    #[error("The point cannot be deleted")]
    DeleteRejected {
        #[source]
        source: TransportError,
    },
}

impl TripError {
    /// True when the operation never reached the server
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TripError::UpdateMissing { .. } | TripError::DeleteMissing { .. }
        )
    }

    /// True when the server call itself failed
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            TripError::UpdateRejected { .. }
                | TripError::AddRejected { .. }
                | TripError::DeleteRejected { .. }
        )
    }

    /// The underlying transport failure, if any
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            TripError::UpdateRejected { source }
            | TripError::AddRejected { source }
            | TripError::DeleteRejected { source } => Some(source),
            _ => None,
        }
    }

    /// Short text suitable for a toast
    pub fn user_message(&self) -> &'static str {
        match self {
            TripError::UpdateMissing { .. } | TripError::DeleteMissing { .. } => {
                "This point no longer exists. Reload the trip and try again."
            }
            TripError::UpdateTargetRemoved { .. } => {
                "This point was deleted while your changes were being saved."
            }
            TripError::UpdateRejected { .. } => "Could not save the point. Please try again.",
            TripError::AddRejected { .. } => "Could not create the point. Please try again.",
            TripError::DeleteRejected { .. } => "Could not delete the point. Please try again.",
        }
    }
}

/// Result type for store operations
pub type TripResult<T> = Result<T, TripError>;
