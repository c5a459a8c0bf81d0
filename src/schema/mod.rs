//! Column typing.
//!
//! This module provides:
//! - `ColumnType`, the supported semantic types
//! - `TypeRegistry`, the ordered column declarations of a vertex file
//! - `coerce`, conversion of raw strings into `PropertyValue`s

mod coerce;
mod registry;
mod types;

pub use coerce::coerce;
pub use registry::{Column, TypeRegistry};
pub use types::{ColumnType, PropertyValue};
