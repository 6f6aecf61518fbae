//! Data models for Trip
//!
//! Defines the trip data structures: points (in client and wire format),
//! offers and destinations.
//!
//! Points exist in two shapes. [`WirePoint`] mirrors the remote API
//! (snake_case keys, RFC 3339 date strings) and [`Point`] is what the rest of
//! the application works with (camelCase keys, parsed dates). Conversion lives
//! in [`crate::adapter`]. Offers and destinations are reference data and keep
//! the same shape on both sides.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server-assigned point identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub String);

impl PointId {
    /// Create an id from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PointId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single itinerary entry in client format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Unique identifier, assigned by the server
    pub id: PointId,
    /// Price of the entry
    pub base_price: f64,
    /// Start of the entry, `None` when the server sent `null`
    pub date_from: Option<DateTime<Utc>>,
    /// End of the entry, `None` when the server sent `null`
    pub date_to: Option<DateTime<Utc>>,
    /// Whether the traveler starred this entry
    pub is_favorite: bool,
    /// Every other attribute, passed through untouched
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Point {
    /// Event type (`taxi`, `flight`, ...), if present
    pub fn event_type(&self) -> Option<&str> {
        self.attributes.get("type").and_then(Value::as_str)
    }

    /// Destination reference, if present
    pub fn destination_id(&self) -> Option<&str> {
        self.attributes.get("destination").and_then(Value::as_str)
    }

    /// Selected offer ids; non-string entries are skipped
    pub fn offer_ids(&self) -> Vec<&str> {
        self.attributes
            .get("offers")
            .and_then(Value::as_array)
            .map(|offers| offers.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Time between start and end, when both are known
    pub fn duration(&self) -> Option<Duration> {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => Some(to - from),
            _ => None,
        }
    }
}

/// A point as the remote API sends it
///
/// Dates are RFC 3339 strings on the wire; serde decodes them here, so a
/// malformed date surfaces as a decode failure of the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
    pub id: PointId,
    pub base_price: f64,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub is_favorite: bool,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Body of an add request
///
/// The server assigns the id, so there is none here. Any field left unset is
/// up to the server to default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl NewPoint {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a pass-through attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Offers available for one event type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferGroup {
    #[serde(rename = "type")]
    pub event_type: String,
    pub offers: Vec<Offer>,
}

/// A single purchasable extra
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub price: f64,
}

/// A place a point can lead to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pictures: Vec<Picture>,
}

/// Illustration attached to a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub src: String,
    #[serde(default)]
    pub description: String,
}
