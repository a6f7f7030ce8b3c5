//! Per-component distance and time accumulation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::ComponentId;

/// Distance (meters) and time (seconds) accrued per component.
///
/// A component missing from either map has accrued zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub distances: BTreeMap<ComponentId, f64>,

    #[serde(default)]
    pub times: BTreeMap<ComponentId, f64>,
}

impl Usage {
    /// Usage of a single activity.
    ///
    /// Every mounted component receives the full distance and time of the ride;
    /// nothing is split between components.
    pub fn from_activity<'a, I>(components: I, distance: f64, time: f64) -> Self
    where
        I: IntoIterator<Item = &'a ComponentId>,
    {
        let mut usage = Self::default();
        for component in components {
            usage.distances.insert(component.clone(), distance);
            usage.times.insert(component.clone(), time);
        }
        usage
    }

    /// Accumulates `other` into `self` in place.
    pub fn add(&mut self, other: &Self) {
        for (component, distance) in &other.distances {
            *self.distances.entry(component.clone()).or_insert(0.0) += distance;
        }
        for (component, time) in &other.times {
            *self.times.entry(component.clone()).or_insert(0.0) += time;
        }
    }

    /// Returns a new `Usage` with both operands accumulated.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        let mut sum = self.clone();
        sum.add(other);
        sum
    }

    /// Distance accrued by `component`, zero if unknown.
    pub fn distance(&self, component: &ComponentId) -> f64 {
        self.distances.get(component).copied().unwrap_or(0.0)
    }

    /// Time accrued by `component`, zero if unknown.
    pub fn time(&self, component: &ComponentId) -> f64 {
        self.times.get(component).copied().unwrap_or(0.0)
    }

    /// True when no component has accrued anything.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty() && self.times.is_empty()
    }
}
