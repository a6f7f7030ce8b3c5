//! Mapping algebra over "what is mounted where".
//!
//! A [`Mapping`] goes from an assignment target (a bike or a hashtag) to a
//! [`ComponentMap`], which in turn goes from component type to component id.
//! A `None` id is a removal marker: it unmounts whatever occupied that type.
//!
//! All functions here are total and never mutate their inputs.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer};

use crate::types::{ComponentId, ComponentType};

/// Component type to component id; `None` marks the type as unmounted.
pub type ComponentMap = BTreeMap<ComponentType, Option<ComponentId>>;

/// Assignment target (bike or hashtag) to its component map.
pub type Mapping<K> = BTreeMap<K, ComponentMap>;

/// Drops removal markers, then drops targets left with no components.
pub fn prune<K: Ord + Clone>(m: &Mapping<K>) -> Mapping<K> {
    m.iter()
        .filter_map(|(target, components)| {
            let mounted: ComponentMap = components
                .iter()
                .filter(|&(_, id)| id.is_some())
                .map(|(ty, id)| (ty.clone(), id.clone()))
                .collect();
            (!mounted.is_empty()).then(|| (target.clone(), mounted))
        })
        .collect()
}

/// Overrides component maps in `m1` by those in `m2`.
///
/// Every target of either input appears in the result; on a type collision the
/// entry from `m2` wins.
pub fn update_mappings<K: Ord + Clone>(m1: &Mapping<K>, m2: &Mapping<K>) -> Mapping<K> {
    let mut result = m1.clone();
    for (target, components) in m2 {
        result
            .entry(target.clone())
            .or_default()
            .extend(components.iter().map(|(ty, id)| (ty.clone(), id.clone())));
    }
    result
}

/// Removes the `excluded` components from every target.
///
/// The target set is preserved, even for targets that end up empty, and
/// removal markers are left untouched.
pub fn filter_mapping<K: Ord + Clone>(
    m: &Mapping<K>,
    excluded: &BTreeSet<ComponentId>,
) -> Mapping<K> {
    m.iter()
        .map(|(target, components)| {
            let kept = components
                .iter()
                .filter(|&(_, id)| id.as_ref().is_none_or(|id| !excluded.contains(id)))
                .map(|(ty, id)| (ty.clone(), id.clone()))
                .collect();
            (target.clone(), kept)
        })
        .collect()
}

/// Deserializes a mapping, reading `null` and `""` ids as removal markers.
pub fn deserialize_mapping<'de, D, K>(deserializer: D) -> Result<Mapping<K>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord,
{
    let raw = BTreeMap::<K, BTreeMap<ComponentType, Option<String>>>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(target, components)| {
            let components = components
                .into_iter()
                .map(|(ty, id)| {
                    let id = id
                        .filter(|id| !id.is_empty())
                        .map(ComponentId::new)
                        .transpose()
                        .map_err(<D::Error as serde::de::Error>::custom)?;
                    Ok((ty, id))
                })
                .collect::<Result<ComponentMap, D::Error>>()?;
            Ok((target, components))
        })
        .collect()
}

/// Every component id mounted anywhere in the mapping.
pub fn mounted_components<K>(m: &Mapping<K>) -> BTreeSet<ComponentId> {
    m.values()
        .flat_map(BTreeMap::values)
        .flatten()
        .cloned()
        .collect()
}
