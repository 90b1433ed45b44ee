//! End-to-end generation: DSL input to the three C artifacts.

use wmigen::{build, emit, generate, DslType, ParseError};

const SAMPLE_INPUT: &str = include_str!("fixtures/sample.input");
const SAMPLE_TYPEDEF: &str = include_str!("fixtures/sample.generated.typedef");
const SAMPLE_HEADER: &str = include_str!("fixtures/sample.generated.h");
const SAMPLE_SOURCE: &str = include_str!("fixtures/sample.generated.c");

const TWO_VARIANTS: &str = r#"
class Msvm_Foo
    string  Caption
    uint32  id
    uint16  OperationalStatus[]
end

class v2/Msvm_Foo
    boolean Healthy
    uint32  id
    string  Caption
end
"#;

#[test]
fn sample_matches_reference_output() {
    let out = generate(SAMPLE_INPUT).expect("generate");
    assert_eq!(out.typedef, SAMPLE_TYPEDEF);
    assert_eq!(out.header, SAMPLE_HEADER);
    assert_eq!(out.source, SAMPLE_SOURCE);
}

#[test]
fn generation_is_deterministic() {
    let a = generate(SAMPLE_INPUT).expect("first run");
    let b = generate(SAMPLE_INPUT).expect("second run");
    assert_eq!(a, b);
}

#[test]
fn classes_emitted_in_name_order() {
    let src = "class Zeta\n  string a\nend\nclass Alpha\n  string a\nend\nclass Mid\n  string a\nend\n";
    let out = generate(src).expect("generate");
    let alpha = out.typedef.find("_Alpha ").expect("Alpha");
    let mid = out.typedef.find("_Mid ").expect("Mid");
    let zeta = out.typedef.find("_Zeta ").expect("Zeta");
    assert!(alpha < mid && mid < zeta);
}

#[test]
fn single_variant_example() {
    let out = generate("class Foo\n  string bar\nend").expect("generate");
    assert_eq!(
        out.typedef,
        "typedef struct _Foo Foo;\ntypedef struct _Foo_Data Foo_Data;\n"
    );
    assert!(out.header.contains("struct _Foo_Data {\n    XML_TYPE_STR bar;\n};\n"));
    assert!(out.header.contains("        Foo_Data *common;\n        Foo_Data *v1;\n"));
    assert!(out
        .source
        .contains("    SER_NS_STR(FOO_RESOURCE_URI, \"bar\", 1),\n"));
    assert!(out.header.contains(
        "#define FOO_RESOURCE_URI \\\n    \"http://schemas.microsoft.com/wbem/wsman/1/wmi/root/cimv2/Foo\"\n"
    ));
}

#[test]
fn common_block_for_multiple_variants() {
    let out = generate(TWO_VARIANTS).expect("generate");
    assert_eq!(
        out.typedef,
        "typedef struct _Msvm_Foo Msvm_Foo;\n\
         typedef struct _Msvm_Foo_Data Msvm_Foo_Data;\n\
         typedef struct _Msvm_Foo_v1_Data Msvm_Foo_v1_Data;\n\
         typedef struct _Msvm_Foo_v2_Data Msvm_Foo_v2_Data;\n"
    );
    assert!(out.header.contains(
        "struct _Msvm_Foo_Data {\n    XML_TYPE_STR Caption;\n    XML_TYPE_UINT32 id;\n};\n\n"
    ));
    assert!(out.header.contains(
        "struct _Msvm_Foo_v1_Data {\n    XML_TYPE_STR Caption;\n    XML_TYPE_UINT32 id;\n    XML_TYPE_DYN_ARRAY OperationalStatus;\n};\n"
    ));
    assert!(out.header.contains(
        "struct _Msvm_Foo_v2_Data {\n    XML_TYPE_STR Caption;\n    XML_TYPE_UINT32 id;\n    XML_TYPE_BOOL Healthy;\n};\n"
    ));
    assert!(out.header.contains(
        "        Msvm_Foo_Data *common;\n        Msvm_Foo_v1_Data *v1;\n        Msvm_Foo_v2_Data *v2;\n"
    ));
    assert!(out.source.contains("    2, (wmiClassInfoPtr []) {\n"));
    assert!(out
        .source
        .contains("            ROOT_VIRTUALIZATION,\n            MSVM_FOO_V1_RESOURCE_URI,\n"));
    assert!(out
        .source
        .contains("            ROOT_VIRTUALIZATION_V2,\n            MSVM_FOO_V2_RESOURCE_URI,\n"));
    assert!(out.source.contains(
        "    SER_NS_DYN_ARRAY(MSVM_FOO_V1_RESOURCE_URI, \"OperationalStatus\", 0, 0, uint16),\n"
    ));
}

#[test]
fn aligned_variants_share_leading_properties() {
    let reg = build(TWO_VARIANTS).expect("build");
    let class = reg.get("Msvm_Foo").expect("class");
    let common = class.common.as_ref().expect("common");
    for variant in &class.variants {
        let lead: Vec<_> = variant.properties[..common.len()]
            .iter()
            .map(|p| (p.name.as_str(), p.ty))
            .collect();
        let expected: Vec<_> = common.iter().map(|p| (p.name.as_str(), p.ty)).collect();
        assert_eq!(lead, expected);
    }
    assert_eq!(class.variants[0].properties.len(), 3);
    assert_eq!(class.variants[1].properties.len(), 3);
}

#[test]
fn every_field_uses_catalog_tag() {
    let reg = build(SAMPLE_INPUT).expect("build");
    let out = emit(&reg);
    for class in reg.classes() {
        for variant in &class.variants {
            for prop in &variant.properties {
                let field = if prop.is_array {
                    format!("XML_TYPE_DYN_ARRAY {};", prop.name)
                } else {
                    format!("XML_TYPE_{} {};", prop.ty.wire_tag(), prop.name)
                };
                assert!(out.header.contains(&field), "missing {}", field);
            }
        }
    }
    assert_eq!(DslType::Datetime.wire_tag().as_str(), "STR");
}

#[test]
fn error_produces_no_output() {
    let err = generate("class Good\n  string a\nend\nclass X\n  badtype y\nend\n").unwrap_err();
    assert!(matches!(err, ParseError::UnknownType { line: 5, .. }));
}

#[test]
fn write_to_creates_three_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = generate(SAMPLE_INPUT).expect("generate");
    let paths = out.write_to(dir.path(), "wmi").expect("write");
    let names: Vec<_> = paths
        .iter()
        .map(|p| p.file_name().expect("name").to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["wmi.generated.typedef", "wmi.generated.h", "wmi.generated.c"]);
    let header = std::fs::read_to_string(dir.path().join("wmi.generated.h")).expect("read");
    assert_eq!(header, SAMPLE_HEADER);
}
