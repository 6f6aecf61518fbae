//! Point ordering
//!
//! The trip list can be ordered by day, duration or price. Ordering by event
//! type or by offers is listed in the UI but disabled.

use std::cmp::{Ordering, Reverse};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Point;

/// Available orderings, in UI order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    #[default]
    Day,
    Event,
    Time,
    Price,
    Offers,
}

impl SortType {
    pub const ALL: [SortType; 5] = [
        SortType::Day,
        SortType::Event,
        SortType::Time,
        SortType::Price,
        SortType::Offers,
    ];

    /// Whether this ordering can actually be selected
    pub fn is_allowed(self) -> bool {
        matches!(self, SortType::Day | SortType::Time | SortType::Price)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortType::Day => "day",
            SortType::Event => "event",
            SortType::Time => "time",
            SortType::Price => "price",
            SortType::Offers => "offers",
        }
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortType::ALL
            .into_iter()
            .find(|sort| sort.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown sort type: {}", s))
    }
}

/// Return a sorted copy of `points`
///
/// Sorting is stable. Points with unknown dates go last for `Day` and
/// `Time`. Disabled orderings return the input order.
pub fn sort_points(points: &[Point], sort: SortType) -> Vec<Point> {
    let mut sorted = points.to_vec();
    match sort {
        SortType::Day => sorted.sort_by(|a, b| nones_last(a.date_from, b.date_from)),
        SortType::Time => {
            sorted.sort_by(|a, b| nones_last(a.duration().map(Reverse), b.duration().map(Reverse)))
        }
        SortType::Price => sorted.sort_by(|a, b| b.base_price.total_cmp(&a.base_price)),
        SortType::Event | SortType::Offers => {}
    }
    sorted
}

fn nones_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PointId;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::Map;

    fn at(day: u32, hour: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap())
    }

    fn point(
        id: &str,
        price: f64,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Point {
        Point {
            id: PointId::new(id),
            base_price: price,
            date_from: from,
            date_to: to,
            is_favorite: false,
            attributes: Map::new(),
        }
    }

    fn ids(points: &[Point]) -> Vec<&str> {
        points.iter().map(|p| p.id.as_str()).collect()
    }

    fn sample() -> Vec<Point> {
        vec![
            point("late-short", 30.0, at(3, 10), at(3, 11)),
            point("undated", 500.0, None, None),
            point("early-long", 10.0, at(1, 8), at(1, 20)),
            point("mid-medium", 200.0, at(2, 9), at(2, 14)),
        ]
    }

    #[test]
    fn test_sort_by_day() {
        let sorted = sort_points(&sample(), SortType::Day);
        assert_eq!(
            ids(&sorted),
            vec!["early-long", "mid-medium", "late-short", "undated"]
        );
    }

    #[test]
    fn test_sort_by_time_longest_first() {
        let sorted = sort_points(&sample(), SortType::Time);
        assert_eq!(
            ids(&sorted),
            vec!["early-long", "mid-medium", "late-short", "undated"]
        );
    }

    #[test]
    fn test_sort_by_price_highest_first() {
        let sorted = sort_points(&sample(), SortType::Price);
        assert_eq!(
            ids(&sorted),
            vec!["undated", "mid-medium", "late-short", "early-long"]
        );
    }

    #[test]
    fn test_disabled_sorts_keep_order() {
        let points = sample();
        for sort in [SortType::Event, SortType::Offers] {
            assert!(!sort.is_allowed());
            assert_eq!(ids(&sort_points(&points, sort)), ids(&points));
        }
    }

    #[test]
    fn test_parse_and_display() {
        for sort in SortType::ALL {
            assert_eq!(sort.to_string().parse::<SortType>().unwrap(), sort);
        }
        assert_eq!("PRICE".parse::<SortType>().unwrap(), SortType::Price);
        assert!("cheapest".parse::<SortType>().is_err());
    }
}
