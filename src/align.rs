//! Struct alignment: move the properties shared by every variant of a class to
//! the front of each variant, in one agreed order, so that a single common
//! struct can describe the leading fields of all of them.

use crate::model::{Property, WmiClass};
use crate::types::DslType;
use std::collections::HashMap;

type Key = (String, DslType);

/// Occurrence tally for one `(name, type)` key.
struct Tally {
    property: Property,
    variants: usize,
}

/// Properties present (same name and type) in every variant, in first-seen order.
pub fn common_properties(class: &WmiClass) -> Vec<Property> {
    let mut index: HashMap<Key, usize> = HashMap::new();
    let mut tallies: Vec<Tally> = Vec::new();

    for variant in &class.variants {
        let mut seen: Vec<usize> = Vec::new();
        for prop in &variant.properties {
            let key = (prop.name.clone(), prop.ty);
            let slot = *index.entry(key).or_insert_with(|| {
                tallies.push(Tally {
                    property: prop.clone(),
                    variants: 0,
                });
                tallies.len() - 1
            });
            if !seen.contains(&slot) {
                seen.push(slot);
                tallies[slot].variants += 1;
            }
        }
    }

    let total = class.variants.len();
    tallies
        .into_iter()
        .filter(|t| t.variants == total)
        .map(|t| t.property)
        .collect()
}

/// Stable reorder: the first occurrence of each common key, in `common` order,
/// followed by every other property in its original relative order.
fn reorder(properties: Vec<Property>, common: &[Property]) -> Vec<Property> {
    let mut rest: Vec<Option<Property>> = properties.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(rest.len());

    for shared in common {
        let found = rest
            .iter()
            .position(|p| p.as_ref().is_some_and(|p| p.key() == shared.key()));
        if let Some(prop) = found.and_then(|i| rest[i].take()) {
            ordered.push(prop);
        }
    }
    ordered.extend(rest.into_iter().flatten());
    ordered
}

/// Align the variants of `class` in place.
///
/// Single-variant classes are left untouched. Otherwise the first variant's
/// name gets its namespace suffix, common properties are moved to the front
/// of every variant and recorded in `class.common`. Later variants already
/// carry a suffix when the DSL declared them with a namespace prefix.
pub fn align(class: &mut WmiClass) {
    if class.variants.len() < 2 {
        return;
    }

    let first = &mut class.variants[0];
    first.name = format!("{}_{}", first.name, first.namespace);

    let common = common_properties(class);
    for variant in &mut class.variants {
        let properties = std::mem::take(&mut variant.properties);
        variant.properties = reorder(properties, &common);
    }

    tracing::debug!(
        class = %class.name,
        variants = class.variants.len(),
        common = common.len(),
        "aligned class variants"
    );
    class.common = Some(common);
}
