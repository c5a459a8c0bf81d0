//! Records produced by the source readers.

use std::sync::Arc;

use crate::schema::{Column, TypeRegistry};

/// One non-blank input line split into fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number in the input.
    pub line: usize,
    pub fields: Vec<String>,
}

/// A vertex data row, viewed as an ordered column name to value mapping.
#[derive(Debug, Clone)]
pub struct VertexRecord {
    pub line: usize,
    registry: Arc<TypeRegistry>,
    values: Vec<String>,
}

impl VertexRecord {
    /// Pairs `values` with the registry's columns; missing trailing values are empty.
    pub fn new(line: usize, registry: Arc<TypeRegistry>, mut values: Vec<String>) -> Self {
        values.resize(registry.len(), String::new());
        VertexRecord {
            line,
            registry,
            values,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Columns and their raw values, in declared column order.
    pub fn iter(&self) -> impl Iterator<Item = (&Column, &str)> {
        self.registry
            .columns()
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.iter()
            .find(|(c, _)| c.name == column)
            .map(|(_, value)| value)
    }
}

/// Three consecutive edge-file rows consumed as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeUnit {
    /// Line of the block's first row.
    pub line: usize,
    /// (name, type, value) triples locating the source vertex.
    pub source: Vec<String>,
    /// (name, type, value) triples locating the target vertex.
    pub target: Vec<String>,
    /// Direction, label, then (name, type, value) property triples.
    pub edge: Vec<String>,
}

/// Unit of work handed to the query builder.
#[derive(Debug, Clone)]
pub enum ImportUnit {
    Vertex(VertexRecord),
    Edge(EdgeUnit),
}

impl ImportUnit {
    pub fn line(&self) -> usize {
        match self {
            ImportUnit::Vertex(record) => record.line,
            ImportUnit::Edge(unit) => unit.line,
        }
    }
}
