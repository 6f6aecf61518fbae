//! Trip state store
//!
//! The `TripStore` holds the in-memory copy of the trip and keeps it in step
//! with the remote API:
//! - points (translated to client format)
//! - offers and destinations (reference data, stored as received)
//! - a flag telling whether the server was unreachable during `init`
//!
//! ## Write policy
//!
//! Every write goes to the server first. Local state only changes once the
//! server has confirmed, so a failed call leaves the store exactly as it
//! was and nothing needs to be rolled back.
//!
//! Collections are handed out as `Arc<Vec<_>>`. A mutation always installs
//! a new `Arc`, so observers can detect change with `Arc::ptr_eq`.
//!
//! ## Usage
//!
//! ```ignore
//! let store = TripStore::new(api);
//! store.subscribe(|kind, point| redraw(kind, point));
//!
//! store.init().await;
//! if store.is_server_unavailable() {
//!     show_error(FAILED_TO_LOAD_MESSAGE);
//! }
//!
//! store.update_point(UpdateType::Patch, &edited).await?;
//! ```

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::adapter::adapt_to_client;
use crate::error::{TripError, TripResult};
use crate::models::{Destination, NewPoint, Offer, OfferGroup, Point, PointId};
use crate::observable::{Observable, SubscriptionId, UpdateType};
use crate::transport::{TransportError, TripApi};

/// Everything fetched from the server
#[derive(Debug, Default)]
struct TripState {
    points: Arc<Vec<Point>>,
    offers: Arc<Vec<OfferGroup>>,
    destinations: Arc<Vec<Destination>>,
    is_server_unavailable: bool,
}

/// In-memory trip, synchronized with a [`TripApi`]
pub struct TripStore<A> {
    /// Remote API
    api: A,
    /// Current collections; never locked across an await
    state: RwLock<TripState>,
    /// Change notifications for views
    observable: Observable<Point>,
}

impl<A: TripApi> TripStore<A> {
    /// Create an empty store backed by `api`
    ///
    /// Nothing is fetched until [`TripStore::init`] runs.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RwLock::new(TripState::default()),
            observable: Observable::new(),
        }
    }

    // ==================== Accessors ====================

    /// Current points, in display order
    pub fn points(&self) -> Arc<Vec<Point>> {
        Arc::clone(&self.read().points)
    }

    /// Current offers, grouped by event type
    pub fn offers(&self) -> Arc<Vec<OfferGroup>> {
        Arc::clone(&self.read().offers)
    }

    /// Current destinations
    pub fn destinations(&self) -> Arc<Vec<Destination>> {
        Arc::clone(&self.read().destinations)
    }

    /// Whether the last `init` failed to reach the server
    pub fn is_server_unavailable(&self) -> bool {
        self.read().is_server_unavailable
    }

    /// Find a point by id
    pub fn point(&self, id: &PointId) -> Option<Point> {
        self.read().points.iter().find(|point| &point.id == id).cloned()
    }

    /// Offers available for an event type (empty if the type is unknown)
    pub fn offers_by_type(&self, event_type: &str) -> Vec<Offer> {
        self.read()
            .offers
            .iter()
            .find(|group| group.event_type == event_type)
            .map(|group| group.offers.clone())
            .unwrap_or_default()
    }

    /// Find a destination by id
    pub fn destination(&self, id: &str) -> Option<Destination> {
        self.read()
            .destinations
            .iter()
            .find(|destination| destination.id == id)
            .cloned()
    }

    // ==================== Subscriptions ====================

    /// Register a change handler
    ///
    /// Handlers run synchronously after each completed operation and may read
    /// the store from inside the callback.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(UpdateType, Option<&Point>) + Send + Sync + 'static,
    {
        self.observable.subscribe(handler)
    }

    /// Remove a change handler
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observable.unsubscribe(id)
    }

    // ==================== Synchronization ====================

    /// Load points, destinations and offers from the server
    ///
    /// Never fails: if any fetch fails, the store is emptied and
    /// `is_server_unavailable()` turns true. Exactly one
    /// [`UpdateType::Init`] notification is sent either way.
    pub async fn init(&self) {
        match self.fetch_all().await {
            Ok((points, destinations, offers)) => {
                info!(
                    "Trip loaded: {} points, {} destinations, {} offer groups",
                    points.len(),
                    destinations.len(),
                    offers.len()
                );
                let mut state = self.write();
                state.points = Arc::new(points);
                state.destinations = Arc::new(destinations);
                state.offers = Arc::new(offers);
                state.is_server_unavailable = false;
            }
            Err(e) => {
                warn!("Failed to load trip, starting empty: {}", e);
                *self.write() = TripState {
                    is_server_unavailable: true,
                    ..TripState::default()
                };
            }
        }

        self.observable.notify(UpdateType::Init, None);
    }

    /// Save changes to an existing point
    ///
    /// Returns the point as stored by the server, which is also what
    /// subscribers receive. If the point is deleted while the call is in
    /// flight, the server's answer is dropped and
    /// [`TripError::UpdateTargetRemoved`] is returned.
    pub async fn update_point(&self, kind: UpdateType, update: &Point) -> TripResult<Point> {
        if !self.contains(&update.id) {
            return Err(TripError::UpdateMissing {
                id: update.id.clone(),
            });
        }

        debug!("Updating point {}", update.id);
        let response = self.api.update_point(update).await.map_err(|source| {
            warn!("Update of point {} rejected: {}", update.id, source);
            TripError::UpdateRejected { source }
        })?;
        let updated = adapt_to_client(response);

        {
            let mut state = self.write();
            // Re-locate: the list may have changed while the call was in flight
            let Some(index) = state.points.iter().position(|point| point.id == update.id) else {
                warn!("Point {} was removed before its update resolved", update.id);
                return Err(TripError::UpdateTargetRemoved {
                    id: update.id.clone(),
                });
            };

            let mut points = Vec::with_capacity(state.points.len());
            points.extend_from_slice(&state.points[..index]);
            points.push(updated.clone());
            points.extend_from_slice(&state.points[index + 1..]);
            state.points = Arc::new(points);
        }

        info!("Point {} updated", updated.id);
        self.observable.notify(kind, Some(&updated));
        Ok(updated)
    }

    /// Create a point
    ///
    /// The server assigns the id. The confirmed point goes to the front of
    /// the list.
    pub async fn add_point(&self, kind: UpdateType, update: &NewPoint) -> TripResult<Point> {
        debug!("Adding point");
        let response = self.api.add_point(update).await.map_err(|source| {
            warn!("Add of point rejected: {}", source);
            TripError::AddRejected { source }
        })?;
        let added = adapt_to_client(response);

        {
            let mut state = self.write();
            // A reload that landed mid-flight may already hold the new point
            let mut points = Vec::with_capacity(state.points.len() + 1);
            points.push(added.clone());
            points.extend(
                state
                    .points
                    .iter()
                    .filter(|point| point.id != added.id)
                    .cloned(),
            );
            state.points = Arc::new(points);
        }

        info!("Point {} added", added.id);
        self.observable.notify(kind, Some(&added));
        Ok(added)
    }

    /// Delete a point
    pub async fn delete_point(&self, kind: UpdateType, update: &Point) -> TripResult<()> {
        if !self.contains(&update.id) {
            return Err(TripError::DeleteMissing {
                id: update.id.clone(),
            });
        }

        debug!("Deleting point {}", update.id);
        self.api.delete_point(update).await.map_err(|source| {
            warn!("Delete of point {} rejected: {}", update.id, source);
            TripError::DeleteRejected { source }
        })?;

        {
            let mut state = self.write();
            if state.points.iter().any(|point| point.id == update.id) {
                let points: Vec<Point> = state
                    .points
                    .iter()
                    .filter(|point| point.id != update.id)
                    .cloned()
                    .collect();
                state.points = Arc::new(points);
            }
        }

        info!("Point {} deleted", update.id);
        self.observable.notify(kind, None);
        Ok(())
    }

    // ==================== Internals ====================

    /// Points first, then destinations and offers side by side
    async fn fetch_all(
        &self,
    ) -> Result<(Vec<Point>, Vec<Destination>, Vec<OfferGroup>), TransportError> {
        let points: Vec<Point> = self
            .api
            .points()
            .await?
            .into_iter()
            .map(adapt_to_client)
            .collect();

        let (destinations, offers) = tokio::try_join!(self.api.destinations(), self.api.offers())?;

        Ok((points, destinations, offers))
    }

    fn contains(&self, id: &PointId) -> bool {
        self.read().points.iter().any(|point| &point.id == id)
    }

    fn read(&self) -> RwLockReadGuard<'_, TripState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TripState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
