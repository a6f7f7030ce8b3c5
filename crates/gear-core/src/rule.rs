//! Time-anchored mounting rules and their combination.
//!
//! A [`Rule`] is a partial re-assignment of components to bikes and hashtags,
//! effective from its `since` timestamp. Rules are folded in temporal order
//! with [`Rule::combine`] to get the assignment in force at a given time.
//!
//! The timestamp type is generic; anything totally ordered works. It defaults
//! to `DateTime<Utc>`, which is what activities carry.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mapping::{
    ComponentMap, Mapping, deserialize_mapping, filter_mapping, mounted_components, prune,
    update_mappings,
};
use crate::types::{BikeId, ComponentId, HashTag};

/// A later rule was combined onto an earlier one out of order.
///
/// Rules must be folded in non-decreasing `since` order. This is a
/// configuration error and is never corrected silently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("rule effective since {next} cannot follow rule effective since {current}")]
pub struct OrderingError<T: fmt::Display> {
    /// `since` of the rule already folded.
    pub current: T,
    /// `since` of the rule being applied, which is earlier.
    pub next: T,
}

/// Component assignments effective from `since` onward.
///
/// A rule read without `since` applies from the timestamp's default, which is
/// the Unix epoch for `DateTime<Utc>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Rule<T = DateTime<Utc>> {
    #[serde(default, deserialize_with = "deserialize_mapping")]
    pub bikes: Mapping<BikeId>,

    #[serde(default, deserialize_with = "deserialize_mapping")]
    pub hashtags: Mapping<HashTag>,

    #[serde(default)]
    pub since: T,
}

impl<T> Rule<T> {
    /// A rule that assigns nothing.
    pub const fn empty(since: T) -> Self {
        Self {
            bikes: Mapping::new(),
            hashtags: Mapping::new(),
            since,
        }
    }

    /// Components mounted for an activity on `bike` tagged with `hashtags`.
    ///
    /// The bike's components come first, then each hashtag's components are
    /// overlaid in the order given. Only an unfolded rule can still carry
    /// removal markers; here they unmount their type.
    pub fn components_for(&self, bike: Option<&BikeId>, hashtags: &[HashTag]) -> ComponentMap {
        let mut resolved = bike
            .and_then(|bike| self.bikes.get(bike))
            .cloned()
            .unwrap_or_default();
        for tag in hashtags {
            if let Some(components) = self.hashtags.get(tag) {
                resolved.extend(components.iter().map(|(ty, id)| (ty.clone(), id.clone())));
            }
        }
        resolved.retain(|_, id| id.is_some());
        resolved
    }

    /// Ids of the components mounted for an activity on `bike` with `hashtags`.
    pub fn mounted(&self, bike: Option<&BikeId>, hashtags: &[HashTag]) -> BTreeSet<ComponentId> {
        self.components_for(bike, hashtags)
            .into_values()
            .flatten()
            .collect()
    }

    /// Every component id this rule places on a bike or hashtag.
    pub fn referenced_components(&self) -> BTreeSet<ComponentId> {
        let mut ids = mounted_components(&self.bikes);
        ids.extend(mounted_components(&self.hashtags));
        ids
    }
}

impl<T: Ord + Clone + fmt::Display> Rule<T> {
    /// Combines this rule with a later one.
    ///
    /// Mappings in `next` override those in `self`. A component that `next`
    /// mounts on a bike is also removed from whichever bike held it before,
    /// since it cannot be on two bikes at once. Hashtags carry no such
    /// exclusivity and are simply overlaid. The result takes `next.since`.
    ///
    /// Fails if `next.since` is earlier than `self.since`; equal timestamps
    /// are allowed and `next` wins.
    pub fn combine(&self, next: &Self) -> Result<Self, OrderingError<T>> {
        if next.since < self.since {
            return Err(OrderingError {
                current: self.since.clone(),
                next: next.since.clone(),
            });
        }

        let reassigned = mounted_components(&next.bikes);
        let bikes = prune(&update_mappings(
            &filter_mapping(&self.bikes, &reassigned),
            &next.bikes,
        ));
        let hashtags = prune(&update_mappings(&self.hashtags, &next.hashtags));

        tracing::trace!(
            since = %next.since,
            reassigned = reassigned.len(),
            "combined rule"
        );

        Ok(Self {
            bikes,
            hashtags,
            since: next.since.clone(),
        })
    }

    /// Folds rules in order into the single rule valid from the last `since`.
    ///
    /// Returns `None` when there are no rules. The first rule is itself
    /// combined onto an empty rule, so the result never carries removal
    /// markers or empty targets.
    pub fn fold<'a, I>(rules: I) -> Result<Option<Self>, OrderingError<T>>
    where
        I: IntoIterator<Item = &'a Self>,
        T: 'a,
    {
        let mut folded: Option<Self> = None;
        for rule in rules {
            let base = folded
                .take()
                .unwrap_or_else(|| Self::empty(rule.since.clone()));
            folded = Some(base.combine(rule)?);
        }
        Ok(folded)
    }
}
