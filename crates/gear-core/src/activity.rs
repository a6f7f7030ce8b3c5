//! Recorded activities replayed against mounting rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{BikeId, HashTag};

/// An activity suitable for usage replay.
///
/// This trait allows replay to work with different activity representations
/// (e.g., records fetched from the tracking service, or test fixtures).
pub trait Activity<T = DateTime<Utc>> {
    /// When the activity started.
    fn timestamp(&self) -> T;

    /// The bike the activity was recorded with, if any.
    fn bike(&self) -> Option<&BikeId>;

    /// Hashtags attached to the activity.
    fn hashtags(&self) -> Vec<HashTag>;

    /// Distance in meters.
    fn distance(&self) -> f64;

    /// Moving time in seconds.
    fn time(&self) -> f64;
}

/// An activity as exported by the tracking service.
///
/// Hashtags are taken from the activity name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub start_date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bike: Option<BikeId>,

    /// Meters.
    pub distance: f64,

    /// Seconds.
    pub moving_time: f64,
}

impl Activity for ActivityRecord {
    fn timestamp(&self) -> DateTime<Utc> {
        self.start_date
    }

    fn bike(&self) -> Option<&BikeId> {
        self.bike.as_ref()
    }

    fn hashtags(&self) -> Vec<HashTag> {
        HashTag::extract(&self.name)
    }

    fn distance(&self) -> f64 {
        self.distance
    }

    fn time(&self) -> f64 {
        self.moving_time
    }
}
