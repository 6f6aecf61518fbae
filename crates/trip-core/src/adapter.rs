//! Wire format to client format translation
//!
//! The remote API speaks snake_case with string dates; the rest of the
//! application expects camelCase keys and parsed dates. Only points are
//! translated, offers and destinations are stored as received.

use crate::models::{Point, WirePoint};

/// Keys that only exist on the wire and must never leak into a client point
const WIRE_ONLY_KEYS: [&str; 4] = ["base_price", "date_from", "date_to", "is_favorite"];

/// Translate a server point into the client representation
///
/// A `null` date stays `None`; it is never coerced into a timestamp.
pub fn adapt_to_client(point: WirePoint) -> Point {
    let WirePoint {
        id,
        base_price,
        date_from,
        date_to,
        is_favorite,
        mut attributes,
    } = point;

    for key in WIRE_ONLY_KEYS {
        attributes.remove(key);
    }

    Point {
        id,
        base_price,
        date_from,
        date_to,
        is_favorite,
        attributes,
    }
}

impl From<WirePoint> for Point {
    fn from(point: WirePoint) -> Self {
        adapt_to_client(point)
    }
}
