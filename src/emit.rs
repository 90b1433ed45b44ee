//! Render aligned classes into the three generated C artifacts: typedefs,
//! struct/metadata header and serialization table source.

use crate::model::{ClassRegistry, ClassVariant, Property, WmiClass};
use std::fmt;
use std::path::{Path, PathBuf};

/// Class name prefix of the Hyper-V virtualization classes.
pub const VIRTUALIZATION_PREFIX: &str = "Msvm_";

const VIRTUALIZATION_BASE_URI: &str =
    "http://schemas.microsoft.com/wbem/wsman/1/wmi/root/virtualization";
const CIMV2_BASE_URI: &str = "http://schemas.microsoft.com/wbem/wsman/1/wmi/root/cimv2";

/// The generated artifacts of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSources {
    pub typedef: String,
    pub header: String,
    pub source: String,
}

/// WMI namespace root a variant is queried under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootUri {
    Cimv2,
    Virtualization,
    VirtualizationV2,
}

impl RootUri {
    pub fn as_str(self) -> &'static str {
        match self {
            RootUri::Cimv2 => "ROOT_CIMV2",
            RootUri::Virtualization => "ROOT_VIRTUALIZATION",
            RootUri::VirtualizationV2 => "ROOT_VIRTUALIZATION_V2",
        }
    }
}

impl fmt::Display for RootUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root and full resource URI for a variant of the class `class_name`.
pub fn uri_info(class_name: &str, variant: &ClassVariant) -> (RootUri, String) {
    let (root, base) = if class_name.starts_with(VIRTUALIZATION_PREFIX) {
        if variant.namespace == "v2" {
            (
                RootUri::VirtualizationV2,
                format!("{}/v2", VIRTUALIZATION_BASE_URI),
            )
        } else {
            (RootUri::Virtualization, VIRTUALIZATION_BASE_URI.to_string())
        }
    } else {
        (RootUri::Cimv2, CIMV2_BASE_URI.to_string())
    };
    (root, format!("{}/{}", base, class_name))
}

fn write_separator(out: &mut impl fmt::Write, name: &str) -> fmt::Result {
    writeln!(out, "/*{}", "*".repeat(51))?;
    writeln!(out, " * {}", name)?;
    writeln!(out, " */")
}

fn write_field(out: &mut impl fmt::Write, prop: &Property) -> fmt::Result {
    if prop.is_array {
        writeln!(out, "    XML_TYPE_DYN_ARRAY {};", prop.name)
    } else {
        writeln!(out, "    XML_TYPE_{} {};", prop.ty.wire_tag(), prop.name)
    }
}

fn write_item(out: &mut impl fmt::Write, variant_upper: &str, prop: &Property) -> fmt::Result {
    if prop.is_array {
        writeln!(
            out,
            "    SER_NS_DYN_ARRAY({}_RESOURCE_URI, \"{}\", 0, 0, {}),",
            variant_upper, prop.name, prop.ty
        )
    } else {
        writeln!(
            out,
            "    SER_NS_{}({}_RESOURCE_URI, \"{}\", 1),",
            prop.ty.wire_tag(),
            variant_upper,
            prop.name
        )
    }
}

fn write_typedef(out: &mut impl fmt::Write, class: &WmiClass) -> fmt::Result {
    writeln!(out, "typedef struct _{0} {0};", class.name)?;
    if class.common.is_some() {
        writeln!(out, "typedef struct _{0}_Data {0}_Data;", class.name)?;
    }
    for variant in &class.variants {
        writeln!(out, "typedef struct _{0}_Data {0}_Data;", variant.name)?;
    }
    Ok(())
}

fn write_header(out: &mut impl fmt::Write, class: &WmiClass) -> fmt::Result {
    let name_upper = class.name.to_ascii_uppercase();

    write_separator(out, &class.name)?;
    writeln!(out)?;
    writeln!(out, "#define {}_CLASSNAME \\", name_upper)?;
    writeln!(out, "    \"{}\"", class.name)?;
    writeln!(out)?;
    writeln!(out, "#define {}_WQL_SELECT \\", name_upper)?;
    writeln!(out, "    \"SELECT * FROM {} \"", class.name)?;
    writeln!(out)?;
    writeln!(out, "extern wmiClassInfoListPtr {}_WMI_Info;", class.name)?;

    if let Some(common) = &class.common {
        writeln!(out, "struct _{}_Data {{", class.name)?;
        for prop in common {
            write_field(out, prop)?;
        }
        writeln!(out, "}};")?;
        writeln!(out)?;
    }

    for variant in &class.variants {
        let (_, resource_uri) = uri_info(&class.name, variant);
        writeln!(out, "#define {}_RESOURCE_URI \\", variant.name.to_ascii_uppercase())?;
        writeln!(out, "    \"{}\"", resource_uri)?;
        writeln!(out)?;
        writeln!(out, "struct _{}_Data {{", variant.name)?;
        for prop in &variant.properties {
            write_field(out, prop)?;
        }
        writeln!(out, "}};")?;
        writeln!(out)?;
        writeln!(out, "SER_DECLARE_TYPE({}_Data);", variant.name)?;
    }

    // Layout is shared with hypervObject.
    writeln!(out)?;
    writeln!(out, "/* must match hypervObject */")?;
    writeln!(out, "struct _{} {{", class.name)?;
    writeln!(out, "    union {{")?;
    let common_data = match (&class.common, class.variants.first()) {
        (None, Some(sole)) => sole.name.as_str(),
        _ => class.name.as_str(),
    };
    writeln!(out, "        {}_Data *common;", common_data)?;
    for variant in &class.variants {
        writeln!(out, "        {}_Data *{};", variant.name, variant.namespace)?;
    }
    writeln!(out, "    }} data;")?;
    writeln!(out, "    wmiClassInfoPtr info;")?;
    writeln!(out, "    {} *next;", class.name)?;
    writeln!(out, "}};")?;
    write!(out, "\n\n\n")
}

fn write_source(out: &mut impl fmt::Write, class: &WmiClass) -> fmt::Result {
    write_separator(out, &class.name)?;

    for variant in &class.variants {
        let variant_upper = variant.name.to_ascii_uppercase();
        writeln!(out, "SER_START_ITEMS({}_Data)", variant.name)?;
        for prop in &variant.properties {
            write_item(out, &variant_upper, prop)?;
        }
        writeln!(out, "SER_END_ITEMS({}_Data);", variant.name)?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "wmiClassInfoListPtr {}_WMI_Info = &(wmiClassInfoList) {{",
        class.name
    )?;
    writeln!(out, "    {}, (wmiClassInfoPtr []) {{", class.variants.len())?;
    for variant in &class.variants {
        let (root, _) = uri_info(&class.name, variant);
        writeln!(out, "        &(wmiClassInfo) {{")?;
        writeln!(out, "            {}_CLASSNAME,", class.name.to_ascii_uppercase())?;
        writeln!(out, "            {},", root)?;
        writeln!(out, "            {}_RESOURCE_URI,", variant.name.to_ascii_uppercase())?;
        writeln!(out, "            {}_Data_TypeInfo", variant.name)?;
        writeln!(out, "        }},")?;
    }
    writeln!(out, "    }}")?;
    writeln!(out, "}};")?;
    write!(out, "\n\n")
}

/// Typedef declarations of one class.
struct TypedefDecl<'a>(&'a WmiClass);

/// Header section of one class.
struct HeaderDecl<'a>(&'a WmiClass);

/// Serialization tables of one class.
struct SourceDefs<'a>(&'a WmiClass);

impl fmt::Display for TypedefDecl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_typedef(f, self.0)
    }
}

impl fmt::Display for HeaderDecl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, self.0)
    }
}

impl fmt::Display for SourceDefs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_source(f, self.0)
    }
}

/// Render every class of an aligned registry, in name order.
pub fn emit(registry: &ClassRegistry) -> GeneratedSources {
    let mut sources = GeneratedSources::default();
    for class in registry.classes() {
        sources.typedef.push_str(&TypedefDecl(class).to_string());
        sources.header.push_str(&HeaderDecl(class).to_string());
        sources.source.push_str(&SourceDefs(class).to_string());
    }
    sources
}

impl GeneratedSources {
    /// `(file suffix, contents)` of each artifact, in write order.
    pub fn artifacts(&self) -> [(&'static str, &str); 3] {
        [
            ("generated.typedef", self.typedef.as_str()),
            ("generated.h", self.header.as_str()),
            ("generated.c", self.source.as_str()),
        ]
    }

    /// Write `<prefix>.generated.{typedef,h,c}` into `dir`, returning the written paths.
    pub fn write_to(&self, dir: &Path, prefix: &str) -> std::io::Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(3);
        for (suffix, contents) in self.artifacts() {
            let path = dir.join(format!("{}.{}", prefix, suffix));
            std::fs::write(&path, contents)?;
            written.push(path);
        }
        Ok(written)
    }
}
