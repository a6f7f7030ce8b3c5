//! Core domain logic for bike component tracking.
//!
//! This crate contains the fundamental types and logic for:
//! - Mapping algebra: pruning, overriding and filtering bike/hashtag assignments
//! - Rules: combining time-anchored assignments into the one in force
//! - Usage: attributing activity distance and time to mounted components

pub mod activity;
pub mod component;
pub mod mapping;
mod rule;
mod rules;
pub mod types;
mod usage;

pub use activity::{Activity, ActivityRecord};
pub use component::Component;
pub use mapping::{ComponentMap, Mapping};
pub use rule::{OrderingError, Rule};
pub use rules::{ApplyResult, Rules, accumulate, resolve_effective_rule};
pub use types::{
    BikeId, BikeName, ComponentId, ComponentName, ComponentType, HashTag, ValidationError,
};
pub use usage::Usage;
