//! Class model: properties, per-namespace class variants, and the registry
//! that groups variants by logical class name.

use crate::types::DslType;
use std::collections::BTreeMap;

/// Namespace tag given to variants declared without a `ns/` prefix.
pub const DEFAULT_NAMESPACE: &str = "v1";

/// One typed property of a class variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub ty: DslType,
    pub name: String,
    pub is_array: bool,
}

impl Property {
    pub fn new(ty: DslType, name: impl Into<String>, is_array: bool) -> Self {
        Property {
            ty,
            name: name.into(),
            is_array,
        }
    }

    /// Identity used to decide whether a property is shared between variants.
    pub fn key(&self) -> (&str, DslType) {
        (&self.name, self.ty)
    }
}

/// One `class ... end` block of the DSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassVariant {
    /// Symbol name used in generated code (e.g. `Msvm_ComputerSystem_v2`).
    pub name: String,
    pub namespace: String,
    pub properties: Vec<Property>,
}

/// All variants of one logical class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmiClass {
    pub name: String,
    /// In DSL encounter order.
    pub variants: Vec<ClassVariant>,
    /// Properties shared by every variant; only set for multi-variant classes after alignment.
    pub common: Option<Vec<Property>>,
}

impl WmiClass {
    pub fn new(name: impl Into<String>, variant: ClassVariant) -> Self {
        WmiClass {
            name: name.into(),
            variants: vec![variant],
            common: None,
        }
    }
}

/// Registry of classes for a single generation run, iterated in name order.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: BTreeMap<String, WmiClass>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variant under its logical name, creating the class on first sight.
    pub fn register(&mut self, logical_name: &str, variant: ClassVariant) {
        tracing::debug!(
            class = logical_name,
            variant = %variant.name,
            namespace = %variant.namespace,
            properties = variant.properties.len(),
            "registered class variant"
        );
        match self.classes.get_mut(logical_name) {
            Some(class) => class.variants.push(variant),
            None => {
                self.classes
                    .insert(logical_name.to_string(), WmiClass::new(logical_name, variant));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&WmiClass> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn variant_count(&self) -> usize {
        self.classes.values().map(|c| c.variants.len()).sum()
    }

    /// Classes in lexicographic name order.
    pub fn classes(&self) -> impl Iterator<Item = &WmiClass> {
        self.classes.values()
    }

    pub fn classes_mut(&mut self) -> impl Iterator<Item = &mut WmiClass> {
        self.classes.values_mut()
    }
}
