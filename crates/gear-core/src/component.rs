//! Tracked components and their accrued totals.

use serde::{Deserialize, Serialize};

use crate::types::{ComponentId, ComponentName};
use crate::usage::Usage;

/// A physical component with its cumulative usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub ident: ComponentId,

    pub name: ComponentName,

    /// Total distance in meters.
    #[serde(default)]
    pub distance: f64,

    /// Total moving time in seconds.
    #[serde(default)]
    pub time: f64,
}

impl Component {
    /// Creates a component with no accrued usage.
    pub const fn new(ident: ComponentId, name: ComponentName) -> Self {
        Self {
            ident,
            name,
            distance: 0.0,
            time: 0.0,
        }
    }

    /// Returns a copy with this component's share of `usage` added.
    #[must_use]
    pub fn add_usage(&self, usage: &Usage) -> Self {
        Self {
            distance: self.distance + usage.distance(&self.ident),
            time: self.time + usage.time(&self.ident),
            ..self.clone()
        }
    }
}
