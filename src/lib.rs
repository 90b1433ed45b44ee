//! # wmigen — WMI class binding generator
//!
//! Reads a small line-oriented DSL describing WMI classes (name, namespace,
//! typed properties) and renders the C bindings a WS-Management client needs
//! for them: type aliases, struct declarations with resource URIs, and
//! serialization tables.
//!
//! ## DSL structure
//!
//! - `class <Name>` or `class <namespace>/<Name>` opens a block
//! - one `<type> <property>` per line, `<property>[]` for arrays
//! - `end` closes the block
//! - `#` starts a comment running to the end of the line
//!
//! Declaring the same class name in several namespaces yields one class with
//! several variants; properties shared by all variants are laid out first so
//! that a common struct describes them.
//!
//! ## Property types
//!
//! `boolean`, `string`, `datetime`, `int8`..`int64` (alias `sint8`..`sint64`),
//! `uint8`..`uint64`.
//!
//! ## Example DSL
//!
//! ```text
//! class Win32_ComputerSystem
//!     string   Name
//!     uint16   PowerManagementCapabilities[]
//! end
//!
//! class v2/Msvm_ComputerSystem
//!     string   Name
//!     uint16   EnabledState
//! end
//! ```
//!
//! ## Usage
//!
//! ```
//! let out = wmigen::generate("class Foo\n  string bar\nend\n").expect("generate");
//! assert!(out.header.contains("XML_TYPE_STR bar;"));
//! ```

pub mod align;
pub mod emit;
pub mod model;
pub mod parser;
pub mod types;

pub use align::align;
pub use emit::{emit, GeneratedSources};
pub use model::{ClassRegistry, ClassVariant, Property, WmiClass};
pub use parser::{parse, ParseError};
pub use types::{DslType, WireTag};

/// Parse and align DSL source, returning the finished class registry.
pub fn build(source: &str) -> Result<ClassRegistry, ParseError> {
    let mut registry = parse(source)?;
    for class in registry.classes_mut() {
        align(class);
    }
    Ok(registry)
}

/// Parse, align and render DSL source. Either all artifacts are produced or none.
pub fn generate(source: &str) -> Result<GeneratedSources, ParseError> {
    build(source).map(|registry| emit(&registry))
}
