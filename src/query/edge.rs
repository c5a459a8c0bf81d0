//! Edge insert queries.
//!
//! An edge unit resolves both endpoints with `has` lookups, then adds one
//! edge between them:
//!
//! ```text
//! src = g.V().has('city', _0_).next(); dst = g.V().has('city', _1_).next(); src.addEdge(_2_, dst)
//! ```

use std::fmt::Write as _;
use std::str::FromStr;

use super::sanitize::{sanitize_property_name, to_snake_case};
use super::{Query, Template};
use crate::error_handling::{ConfigurationError, ImportError, TypeCoercionError, WarningTally};
use crate::schema::{coerce, ColumnType, PropertyValue};
use crate::source::EdgeUnit;

/// Which endpoint the edge leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Target to source.
    In,
    /// Source to target.
    Out,
}

impl FromStr for Direction {
    type Err = ConfigurationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match to_snake_case(token).as_str() {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            other => Err(ConfigurationError::UnsupportedDirection(other.to_string())),
        }
    }
}

/// One (name, type, value) triple with a non-empty value.
struct Triple<'a> {
    name: &'a str,
    ty: &'a str,
    value: &'a str,
}

/// Splits a field list into triples, skipping those with an empty value.
///
/// A trailing partial triple is tolerated only when all of its fields are empty.
fn triples<'a>(
    fields: &'a [String],
    line: usize,
    side: &'static str,
) -> Result<Vec<Triple<'a>>, ConfigurationError> {
    let mut chunks = fields.chunks_exact(3);
    let found = chunks
        .by_ref()
        .filter(|chunk| !chunk[2].trim().is_empty())
        .map(|chunk| Triple {
            name: &chunk[0],
            ty: &chunk[1],
            value: &chunk[2],
        })
        .collect();
    if chunks.remainder().iter().any(|field| !field.trim().is_empty()) {
        return Err(ConfigurationError::IncompleteTriple { line, side });
    }
    Ok(found)
}

/// Parses the inline type of a triple. `label` is not a property type.
fn parse_triple_type(name: &str, token: &str) -> Result<ColumnType, TypeCoercionError> {
    match ColumnType::parse_declared(&to_snake_case(token)) {
        Some(ColumnType::Label) => Err(TypeCoercionError::LabelNotAllowed {
            column: name.to_string(),
        }),
        Some(ty) => Ok(ty),
        None => Err(TypeCoercionError::UnsupportedType {
            column: name.to_string(),
            declared: token.trim().to_string(),
        }),
    }
}

/// Appends `.has('key', _n_)` for every triple of one endpoint.
fn build_match(
    fields: &[String],
    line: usize,
    side: &'static str,
    prefix: &str,
    template: &mut Template,
    warnings: &mut WarningTally,
) -> Result<String, ImportError> {
    let found = triples(fields, line, side)?;
    if found.is_empty() {
        return Err(ConfigurationError::EmptyMatch { line, side }.into());
    }

    let mut text = format!("{prefix}.V()");
    for triple in found {
        let key = sanitize_property_name(triple.name, warnings)?;
        let ty = parse_triple_type(triple.name, triple.ty)?;
        let param = template.bind(coerce(triple.name, ty, triple.value)?);
        let _ = write!(text, ".has('{key}', {param})");
    }
    Ok(text)
}

/// Builds the query creating one edge between two looked-up vertices.
///
/// Bindings are numbered in emission order: source values, target values,
/// the label, then edge properties.
pub fn build_edge_query(
    unit: &EdgeUnit,
    prefix: &str,
    warnings: &mut WarningTally,
) -> Result<Query, ImportError> {
    let mut template = Template::default();
    let line = unit.line;

    let source = build_match(&unit.source, line, "source", prefix, &mut template, warnings)?;
    let target = build_match(&unit.target, line, "target", prefix, &mut template, warnings)?;

    let direction: Direction = unit
        .edge
        .first()
        .map(String::as_str)
        .unwrap_or_default()
        .parse()?;
    let label = unit
        .edge
        .get(1)
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .ok_or(ConfigurationError::MissingEdgeLabel { line })?;
    let label = template.bind(PropertyValue::Text(label.to_string()));

    let mut properties = String::new();
    for triple in triples(unit.edge.get(2..).unwrap_or_default(), line, "edge")? {
        let key = sanitize_property_name(triple.name, warnings)?;
        let ty = parse_triple_type(triple.name, triple.ty)?;
        let param = template.bind(coerce(triple.name, ty, triple.value)?);
        let _ = write!(properties, ", '{key}', {param}");
    }

    let (from, to) = match direction {
        Direction::Out => ("src", "dst"),
        Direction::In => ("dst", "src"),
    };
    let text = format!(
        "src = {source}.next(); dst = {target}.next(); {from}.addEdge({label}, {to}{properties})"
    );
    Ok(template.finish(text))
}
