//! End-to-end behavior of the store through the public API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use trip_core::{
    Destination, NewPoint, OfferGroup, Point, TransportError, TripApi, TripStore, UpdateType,
    WirePoint,
};

/// API that answers every add with the same canned point and counts writes
struct CannedApi {
    added: Value,
    calls: AtomicUsize,
}

#[async_trait]
impl TripApi for CannedApi {
    async fn points(&self) -> Result<Vec<WirePoint>, TransportError> {
        Err(TransportError::Network("offline".to_string()))
    }

    async fn destinations(&self) -> Result<Vec<Destination>, TransportError> {
        Ok(Vec::new())
    }

    async fn offers(&self) -> Result<Vec<OfferGroup>, TransportError> {
        Ok(Vec::new())
    }

    async fn update_point(&self, _point: &Point) -> Result<WirePoint, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::Status {
            status: 500,
            message: "not expected".to_string(),
        })
    }

    async fn add_point(&self, point: &NewPoint) -> Result<WirePoint, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(point.attributes.get("title"), Some(&json!("Museum")));
        Ok(serde_json::from_value(self.added.clone())?)
    }

    async fn delete_point(&self, _point: &Point) -> Result<(), TransportError> {
        Ok(())
    }
}

fn museum_api() -> CannedApi {
    CannedApi {
        added: json!({
            "id": "p1",
            "base_price": 20,
            "date_from": null,
            "date_to": null,
            "is_favorite": false,
            "title": "Museum"
        }),
        calls: AtomicUsize::new(0),
    }
}

#[tokio::test]
async fn test_add_to_empty_store() {
    let store = TripStore::new(museum_api());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |kind, point: Option<&Point>| {
        sink.lock().unwrap().push((kind, point.cloned()));
    });

    let draft = NewPoint::new().with_attribute("title", "Museum");
    let added = store.add_point(UpdateType::Minor, &draft).await.unwrap();

    let points = store.points();
    assert_eq!(points.len(), 1);
    assert_eq!(
        serde_json::to_value(&points[0]).unwrap(),
        json!({
            "id": "p1",
            "basePrice": 20.0,
            "dateFrom": null,
            "dateTo": null,
            "isFavorite": false,
            "title": "Museum"
        })
    );

    let seen = seen.lock().unwrap();
    assert_eq!(*seen, vec![(UpdateType::Minor, Some(added))]);
}

#[tokio::test]
async fn test_unreachable_server_still_renders_empty_trip() {
    let store = TripStore::new(museum_api());
    let inits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&inits);
    store.subscribe(move |kind, point| {
        assert!(point.is_none());
        if kind == UpdateType::Init {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    store.init().await;

    assert!(store.is_server_unavailable());
    assert!(store.points().is_empty());
    assert!(store.offers().is_empty());
    assert!(store.destinations().is_empty());
    assert_eq!(inits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_update_on_empty_store_never_calls_server() {
    let api = Arc::new(museum_api());
    let store = TripStore::new(Arc::clone(&api));
    let point: Point = serde_json::from_value(json!({
        "id": "missing",
        "basePrice": 1,
        "dateFrom": null,
        "dateTo": null,
        "isFavorite": false
    }))
    .unwrap();

    let err = store
        .update_point(UpdateType::Patch, &point)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Unable to update a non-existent point");
    assert_eq!(api.calls.load(Ordering::SeqCst), 0);
}
