//! The authored rule set and activity replay.
//!
//! [`Rules`] bundles the bike/component catalog with the ordered list of
//! mounting rules. Replaying activities folds the rules forward in time and
//! attributes each activity's distance and time to the components mounted
//! when it started.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::component::Component;
use crate::rule::{OrderingError, Rule};
use crate::types::{BikeId, BikeName, ComponentId};
use crate::usage::Usage;

/// Catalog of bikes and components plus the rules that mount them.
///
/// `rules` must be sorted by `since` ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Rules<T = DateTime<Utc>> {
    #[serde(default)]
    pub bike_names: BTreeMap<BikeId, BikeName>,

    #[serde(default)]
    pub components: Vec<Component>,

    #[serde(default)]
    pub rules: Vec<Rule<T>>,
}

/// Result of replaying activities against a rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyResult {
    /// Catalog components with the replayed usage added, in catalog order.
    pub components: Vec<Component>,

    /// Usage per component id, including ids missing from the catalog.
    pub usage: Usage,

    /// Activities during which no component was mounted.
    pub unassigned_activities: usize,
}

/// Returns the rule in force at `at`.
///
/// Folds the prefix of `rules` whose `since` is not after `at`. Before the
/// first rule nothing is mounted, which yields an empty rule effective at `at`.
pub fn resolve_effective_rule<T>(rules: &[Rule<T>], at: &T) -> Result<Rule<T>, OrderingError<T>>
where
    T: Ord + Clone + fmt::Display,
{
    let prefix = rules.iter().take_while(|rule| rule.since <= *at);
    Ok(Rule::fold(prefix)?.unwrap_or_else(|| Rule::empty(at.clone())))
}

/// Applies each component's accumulated usage, for reporting.
///
/// Components without an entry are returned unchanged.
pub fn accumulate(
    components: &[Component],
    usage_per_component: &BTreeMap<ComponentId, Usage>,
) -> Vec<Component> {
    components
        .iter()
        .map(|component| match usage_per_component.get(&component.ident) {
            Some(usage) => component.add_usage(usage),
            None => component.clone(),
        })
        .collect()
}

impl<T> Rules<T> {
    /// Display name of a bike, if cataloged.
    pub fn bike_name(&self, bike: &BikeId) -> Option<&BikeName> {
        self.bike_names.get(bike)
    }

    /// Catalog entry for a component id.
    pub fn component(&self, ident: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| &c.ident == ident)
    }

    /// Component ids referenced by rules but missing from the catalog.
    pub fn uncataloged_components(&self) -> BTreeSet<ComponentId> {
        let known: BTreeSet<&ComponentId> = self.components.iter().map(|c| &c.ident).collect();
        self.rules
            .iter()
            .flat_map(Rule::referenced_components)
            .filter(|ident| !known.contains(ident))
            .collect()
    }
}

impl<T: Ord + Clone + fmt::Display> Rules<T> {
    /// Checks that rules are sorted by `since`, without folding them.
    pub fn check_order(&self) -> Result<(), OrderingError<T>> {
        match self.rules.windows(2).find(|pair| pair[1].since < pair[0].since) {
            Some(pair) => Err(OrderingError {
                current: pair[0].since.clone(),
                next: pair[1].since.clone(),
            }),
            None => Ok(()),
        }
    }

    /// The rule in force at `at`.
    pub fn effective_at(&self, at: &T) -> Result<Rule<T>, OrderingError<T>> {
        resolve_effective_rule(&self.rules, at)
    }

    /// Replays activities and attributes their usage to mounted components.
    ///
    /// Activities may come in any order; they are replayed by timestamp so the
    /// rules only need to be folded once. The whole rule list is checked for
    /// ordering up front, so a misordered rule after the last activity is still
    /// reported.
    pub fn apply<A: Activity<T>>(&self, activities: &[A]) -> Result<ApplyResult, OrderingError<T>> {
        self.check_order()?;

        for ident in self.uncataloged_components() {
            tracing::warn!(component = %ident, "rules reference a component missing from the catalog");
        }

        let mut ordered: Vec<&A> = activities.iter().collect();
        ordered.sort_by_key(|activity| activity.timestamp());

        let mut pending = self.rules.iter().peekable();
        let mut current: Option<Rule<T>> = None;
        let mut unknown_bikes: BTreeSet<&BikeId> = BTreeSet::new();
        let mut usage = Usage::default();
        let mut unassigned_activities = 0;

        for activity in ordered {
            let at = activity.timestamp();
            while let Some(rule) = pending.next_if(|rule| rule.since <= at) {
                let base = current
                    .take()
                    .unwrap_or_else(|| Rule::empty(rule.since.clone()));
                current = Some(base.combine(rule)?);
                tracing::debug!(since = %rule.since, "rule now in force");
            }

            if let Some(bike) = activity.bike() {
                if !self.bike_names.contains_key(bike) && unknown_bikes.insert(bike) {
                    tracing::warn!(bike = %bike, "activity recorded on a bike missing from the catalog");
                }
            }

            let mounted = current
                .as_ref()
                .map(|rule| rule.mounted(activity.bike(), &activity.hashtags()))
                .unwrap_or_default();
            if mounted.is_empty() {
                unassigned_activities += 1;
                tracing::debug!(at = %at, "no components mounted for activity");
                continue;
            }

            usage.add(&Usage::from_activity(
                &mounted,
                activity.distance(),
                activity.time(),
            ));
        }

        tracing::debug!(
            activities = activities.len(),
            unassigned_activities,
            components = usage.distances.len(),
            "replayed activities"
        );

        Ok(ApplyResult {
            components: self.components.iter().map(|c| c.add_usage(&usage)).collect(),
            usage,
            unassigned_activities,
        })
    }
}
