//! Trip Core Library
//!
//! This crate holds the client-side state of an itinerary planner: the
//! traveler's points, the offers and destinations they can pick from, and
//! the synchronization of all of it with a remote trip API.
//!
//! # Architecture
//!
//! - **Server first**: every write is confirmed by the API before the local
//!   copy changes
//! - **Observers**: views subscribe to the store and redraw on notification
//!
//! # Quick Start
//!
//! ```text
//! let store = TripStore::new(api);
//! store.subscribe(|kind, point| println!("{:?} {:?}", kind, point));
//!
//! store.init().await;
//!
//! let draft = NewPoint::new().with_attribute("title", "Museum");
//! let point = store.add_point(UpdateType::Minor, &draft).await?;
//! ```
//!
//! # Modules
//!
//! - `store`: State store and synchronization (main entry point)
//! - `models`: Points, offers and destinations
//! - `adapter`: Wire to client point translation
//! - `observable`: Change notifications
//! - `transport`: Remote API contract
//! - `sort`, `filter`: List presentation helpers
//! - `config`: Application configuration

pub mod adapter;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod observable;
pub mod sort;
pub mod store;
pub mod telemetry;
pub mod transport;

pub use adapter::adapt_to_client;
pub use config::Config;
pub use error::{TripError, TripResult};
pub use filter::{filter_points, FilterType, FAILED_TO_LOAD_MESSAGE};
pub use models::{Destination, NewPoint, Offer, OfferGroup, Picture, Point, PointId, WirePoint};
pub use observable::{Observable, SubscriptionId, UpdateType};
pub use sort::{sort_points, SortType};
pub use store::TripStore;
pub use transport::{TransportError, TripApi};
