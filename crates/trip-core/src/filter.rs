//! Time-based point filters and their empty-list messages

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Point;

/// Shown instead of the list when the initial load failed
pub const FAILED_TO_LOAD_MESSAGE: &str = "Failed to load latest route information";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Everything,
    Future,
    Present,
    Past,
}

impl FilterType {
    pub const ALL: [FilterType; 4] = [
        FilterType::Everything,
        FilterType::Future,
        FilterType::Present,
        FilterType::Past,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::Everything => "everything",
            FilterType::Future => "future",
            FilterType::Present => "present",
            FilterType::Past => "past",
        }
    }

    /// Text shown when no point matches this filter
    pub fn empty_list_message(self) -> &'static str {
        match self {
            FilterType::Everything => "Click New Event to create your first point",
            FilterType::Future => "There are no future events now",
            FilterType::Present => "There are no present events now",
            FilterType::Past => "There are no past events now",
        }
    }

    /// Whether `point` belongs under this filter at `now`
    ///
    /// Points with unknown dates only show up under `Everything`.
    pub fn matches(self, point: &Point, now: DateTime<Utc>) -> bool {
        match self {
            FilterType::Everything => true,
            FilterType::Future => point.date_from.is_some_and(|from| from > now),
            FilterType::Present => match (point.date_from, point.date_to) {
                (Some(from), Some(to)) => from <= now && now <= to,
                _ => false,
            },
            FilterType::Past => point.date_to.is_some_and(|to| to < now),
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown filter type: {}", s))
    }
}

/// Points matching `filter` at `now`, in their original order
pub fn filter_points(points: &[Point], filter: FilterType, now: DateTime<Utc>) -> Vec<Point> {
    points
        .iter()
        .filter(|point| filter.matches(point, now))
        .cloned()
        .collect()
}

/// Count matches for every filter, for disabling empty filter tabs
pub fn filter_counts(points: &[Point], now: DateTime<Utc>) -> Vec<(FilterType, usize)> {
    FilterType::ALL
        .into_iter()
        .map(|filter| {
            let count = points.iter().filter(|p| filter.matches(p, now)).count();
            (filter, count)
        })
        .collect()
}
