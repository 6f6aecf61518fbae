//! Remote API contract
//!
//! The store does not talk HTTP itself. It drives any [`TripApi`]
//! implementation, which is expected to resolve with decoded bodies or fail
//! with a [`TransportError`].

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Destination, NewPoint, OfferGroup, Point, WirePoint};

/// Transport-level failure
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(error: serde_json::Error) -> Self {
        TransportError::Decode(error.to_string())
    }
}

/// Asynchronous access to the trip API
#[async_trait]
pub trait TripApi: Send + Sync {
    /// All points, in server order
    async fn points(&self) -> Result<Vec<WirePoint>, TransportError>;

    /// All destinations
    async fn destinations(&self) -> Result<Vec<Destination>, TransportError>;

    /// Offers grouped by event type
    async fn offers(&self) -> Result<Vec<OfferGroup>, TransportError>;

    /// Persist changes to an existing point, returning the stored version
    async fn update_point(&self, point: &Point) -> Result<WirePoint, TransportError>;

    /// Create a point, returning it with its server-assigned id
    async fn add_point(&self, point: &NewPoint) -> Result<WirePoint, TransportError>;

    /// Remove a point
    async fn delete_point(&self, point: &Point) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: TripApi + ?Sized> TripApi for Arc<T> {
    async fn points(&self) -> Result<Vec<WirePoint>, TransportError> {
        (**self).points().await
    }

    async fn destinations(&self) -> Result<Vec<Destination>, TransportError> {
        (**self).destinations().await
    }

    async fn offers(&self) -> Result<Vec<OfferGroup>, TransportError> {
        (**self).offers().await
    }

    async fn update_point(&self, point: &Point) -> Result<WirePoint, TransportError> {
        (**self).update_point(point).await
    }

    async fn add_point(&self, point: &NewPoint) -> Result<WirePoint, TransportError> {
        (**self).add_point(point).await
    }

    async fn delete_point(&self, point: &Point) -> Result<(), TransportError> {
        (**self).delete_point(point).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_from_serde() {
        let err = serde_json::from_str::<WirePoint>("{").unwrap_err();
        let err = TransportError::from(err);

        assert!(matches!(err, TransportError::Decode(_)));
        assert!(err.to_string().starts_with("Malformed response"));
    }

    #[test]
    fn test_status_display() {
        let err = TransportError::Status {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Server responded with 503: Service Unavailable"
        );
    }
}
