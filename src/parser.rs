//! Parse DSL source into class variants using PEST for line tokenization.
//!
//! The input is line oriented: a `class <Name>` line opens a block, each following
//! line declares one `<type> <name>` property (`<name>[]` for arrays) and a line
//! reading `end` closes the block. Everything from `#` to the end of a line is a comment.

use crate::model::{ClassRegistry, ClassVariant, Property, DEFAULT_NAMESPACE};
use crate::types;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct LineParser;

/// Separates the namespace tag from the class name in a block header.
pub const NAMESPACE_SEPARATOR: char = '/';

/// Fatal input error. Every variant names the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: unhandled property type {ty}")]
    UnknownType { line: usize, ty: String },
    #[error("line {line}: invalid block header")]
    InvalidHeader { line: usize },
    #[error("line {line}: invalid property")]
    InvalidProperty { line: usize },
    #[error("line {line}: nested block found")]
    NestedBlock { line: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnknownType { line, .. }
            | ParseError::InvalidHeader { line }
            | ParseError::InvalidProperty { line }
            | ParseError::NestedBlock { line } => *line,
        }
    }
}

/// One whitespace-separated token of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Word<'a> {
    /// Full token text, including any `[]` suffix.
    text: &'a str,
    /// Text without the `[]` suffix.
    stem: &'a str,
    is_array: bool,
}

fn tokenize(line_no: usize, raw: &str) -> Result<Vec<Word<'_>>, ParseError> {
    // The line rule accepts any text; a failure here is reported against the line.
    let pairs = LineParser::parse(Rule::line, raw)
        .map_err(|_| ParseError::InvalidProperty { line: line_no })?;
    let mut words = Vec::new();
    for pair in pairs.flatten().filter(|p| p.as_rule() == Rule::word) {
        let text = pair.as_str();
        let mut stem = "";
        let mut is_array = false;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::bare_word => stem = inner.as_str(),
                Rule::array_suffix => is_array = true,
                _ => {}
            }
        }
        words.push(Word {
            text,
            stem,
            is_array,
        });
    }
    Ok(words)
}

/// An open `class` block.
struct Block {
    line: usize,
    namespace: String,
    logical_name: String,
    name: String,
    properties: Vec<Property>,
}

fn parse_header(line_no: usize, words: &[Word<'_>]) -> Result<Block, ParseError> {
    let name = match words {
        [keyword, name] if keyword.text == "class" => name.text,
        _ => return Err(ParseError::InvalidHeader { line: line_no }),
    };
    let (namespace, logical_name, name) = match name.split_once(NAMESPACE_SEPARATOR) {
        Some((ns, logical)) => (ns, logical, format!("{}_{}", logical, ns)),
        None => (DEFAULT_NAMESPACE, name, name.to_string()),
    };
    Ok(Block {
        line: line_no,
        namespace: namespace.to_string(),
        logical_name: logical_name.to_string(),
        name,
        properties: Vec::new(),
    })
}

fn parse_property(line_no: usize, words: &[Word<'_>]) -> Result<Property, ParseError> {
    let [ty, name] = words else {
        return Err(ParseError::InvalidProperty { line: line_no });
    };
    if name.stem.is_empty() {
        return Err(ParseError::InvalidProperty { line: line_no });
    }
    let ty = types::lookup(ty.text).ok_or_else(|| ParseError::UnknownType {
        line: line_no,
        ty: ty.text.to_string(),
    })?;
    Ok(Property::new(ty, name.stem, name.is_array))
}

/// Parse DSL source, registering every class block into `registry`.
///
/// Lines outside of a block that do not open one are ignored. The first
/// malformed line aborts the parse. A block still open at the end of the
/// input is dropped with a warning.
pub fn parse_into(source: &str, registry: &mut ClassRegistry) -> Result<(), ParseError> {
    let mut block: Option<Block> = None;

    for (i, raw) in source.lines().enumerate() {
        let line_no = i + 1;
        let words = tokenize(line_no, raw)?;
        let Some(first) = words.first() else {
            continue;
        };

        if first.text.starts_with("class") {
            if block.is_some() {
                return Err(ParseError::NestedBlock { line: line_no });
            }
            block = Some(parse_header(line_no, &words)?);
            continue;
        }

        let Some(open) = block.as_mut() else {
            continue;
        };
        if words.len() == 1 && first.text == "end" {
            if let Some(done) = block.take() {
                registry.register(
                    &done.logical_name,
                    ClassVariant {
                        name: done.name,
                        namespace: done.namespace,
                        properties: done.properties,
                    },
                );
            }
        } else {
            open.properties.push(parse_property(line_no, &words)?);
        }
    }

    if let Some(open) = block {
        tracing::warn!(
            line = open.line,
            class = %open.logical_name,
            "dropping class block without `end`"
        );
    }
    Ok(())
}

/// Parse DSL source into a fresh registry.
pub fn parse(source: &str) -> Result<ClassRegistry, ParseError> {
    let mut registry = ClassRegistry::new();
    parse_into(source, &mut registry)?;
    Ok(registry)
}
