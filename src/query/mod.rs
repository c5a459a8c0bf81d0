//! Gremlin query construction.
//!
//! Turns an `ImportUnit` into a Groovy script template plus out-of-band
//! bindings. Values read from the input are never written into the template;
//! each one is bound to a generated parameter name (`_0_`, `_1_`, ...).

mod edge;
mod sanitize;
mod vertex;

use crate::error_handling::{ImportError, WarningTally};
use crate::schema::PropertyValue;
use crate::source::ImportUnit;

pub use edge::{build_edge_query, Direction};
pub use sanitize::{is_reserved_key, is_reserved_word, sanitize_property_name, to_snake_case};
pub use vertex::build_vertex_query;

/// A query template and its parameter bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    text: String,
    bindings: Vec<(String, PropertyValue)>,
}

impl Query {
    /// A query without bindings.
    pub fn new(text: impl Into<String>) -> Self {
        Query {
            text: text.into(),
            bindings: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bindings in the order their parameters were generated.
    pub fn bindings(&self) -> &[(String, PropertyValue)] {
        &self.bindings
    }

    pub fn binding(&self, name: &str) -> Option<&PropertyValue> {
        self.bindings
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value)
    }

    /// Bindings as the JSON object sent to the server.
    pub fn bindings_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.bindings
            .iter()
            .map(|(param, value)| (param.clone(), value.to_json()))
            .collect()
    }
}

/// Accumulates bindings and hands out their parameter names.
#[derive(Debug, Default)]
pub(crate) struct Template {
    bindings: Vec<(String, PropertyValue)>,
}

impl Template {
    pub(crate) fn bind(&mut self, value: PropertyValue) -> String {
        let param = format!("_{}_", self.bindings.len());
        self.bindings.push((param.clone(), value));
        param
    }

    pub(crate) fn finish(self, text: String) -> Query {
        Query {
            text,
            bindings: self.bindings,
        }
    }
}

/// Builds the insert query for one unit.
///
/// `prefix` is the traversal source (usually `g`). Renamed properties are
/// recorded in `warnings`.
///
/// # Errors
///
/// Returns `ImportError::Configuration` or `ImportError::TypeCoercion` when the
/// unit cannot be expressed as a query; both abort the job.
pub fn build_query(
    unit: &ImportUnit,
    prefix: &str,
    warnings: &mut WarningTally,
) -> Result<Query, ImportError> {
    let query = match unit {
        ImportUnit::Vertex(record) => build_vertex_query(record, prefix, warnings)?,
        ImportUnit::Edge(edge) => build_edge_query(edge, prefix, warnings)?,
    };
    log::trace!(
        "Query for line {}: {} {:?}",
        unit.line(),
        query.text(),
        query.bindings_json()
    );
    Ok(query)
}
