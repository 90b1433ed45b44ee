//! Type catalog: DSL primitive type names and the wire tags they serialize as.

use std::fmt;

/// Primitive property type as written in the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DslType {
    Boolean,
    String,
    Datetime,
    Int8,
    Sint8,
    Int16,
    Sint16,
    Int32,
    Sint32,
    Int64,
    Sint64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

/// Serialization tag a property is encoded with on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireTag {
    Bool,
    Str,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

const CATALOG: &[(&str, DslType)] = &[
    ("boolean", DslType::Boolean),
    ("string", DslType::String),
    ("datetime", DslType::Datetime),
    ("int8", DslType::Int8),
    ("sint8", DslType::Sint8),
    ("int16", DslType::Int16),
    ("sint16", DslType::Sint16),
    ("int32", DslType::Int32),
    ("sint32", DslType::Sint32),
    ("int64", DslType::Int64),
    ("sint64", DslType::Sint64),
    ("uint8", DslType::Uint8),
    ("uint16", DslType::Uint16),
    ("uint32", DslType::Uint32),
    ("uint64", DslType::Uint64),
];

/// Look up a DSL type name. Returns `None` for names outside the catalog.
pub fn lookup(name: &str) -> Option<DslType> {
    CATALOG
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, ty)| ty)
}

impl DslType {
    /// Name of the type as spelled in the DSL.
    pub fn as_str(self) -> &'static str {
        match self {
            DslType::Boolean => "boolean",
            DslType::String => "string",
            DslType::Datetime => "datetime",
            DslType::Int8 => "int8",
            DslType::Sint8 => "sint8",
            DslType::Int16 => "int16",
            DslType::Sint16 => "sint16",
            DslType::Int32 => "int32",
            DslType::Sint32 => "sint32",
            DslType::Int64 => "int64",
            DslType::Sint64 => "sint64",
            DslType::Uint8 => "uint8",
            DslType::Uint16 => "uint16",
            DslType::Uint32 => "uint32",
            DslType::Uint64 => "uint64",
        }
    }

    /// Wire tag for this type. `datetime` travels as a plain string.
    pub fn wire_tag(self) -> WireTag {
        match self {
            DslType::Boolean => WireTag::Bool,
            DslType::String | DslType::Datetime => WireTag::Str,
            DslType::Int8 | DslType::Sint8 => WireTag::Int8,
            DslType::Int16 | DslType::Sint16 => WireTag::Int16,
            DslType::Int32 | DslType::Sint32 => WireTag::Int32,
            DslType::Int64 | DslType::Sint64 => WireTag::Int64,
            DslType::Uint8 => WireTag::Uint8,
            DslType::Uint16 => WireTag::Uint16,
            DslType::Uint32 => WireTag::Uint32,
            DslType::Uint64 => WireTag::Uint64,
        }
    }
}

impl fmt::Display for DslType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WireTag {
    /// Suffix used in generated `XML_TYPE_*` and `SER_NS_*` identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            WireTag::Bool => "BOOL",
            WireTag::Str => "STR",
            WireTag::Int8 => "INT8",
            WireTag::Int16 => "INT16",
            WireTag::Int32 => "INT32",
            WireTag::Int64 => "INT64",
            WireTag::Uint8 => "UINT8",
            WireTag::Uint16 => "UINT16",
            WireTag::Uint32 => "UINT32",
            WireTag::Uint64 => "UINT64",
        }
    }
}

impl fmt::Display for WireTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
