//! Vertex insert queries.

use std::fmt::Write as _;

use super::sanitize::sanitize_property_name;
use super::{Query, Template};
use crate::error_handling::{ImportError, WarningTally};
use crate::schema::{coerce, ColumnType, PropertyValue};
use crate::source::VertexRecord;

/// Builds `<prefix>.addV(label).property(key, value)...` for one vertex row.
///
/// Columns are visited in declared order. Empty values are dropped; the
/// `label` column supplies the vertex label; every other column becomes a
/// property coerced to its declared type.
pub fn build_vertex_query(
    record: &VertexRecord,
    prefix: &str,
    warnings: &mut WarningTally,
) -> Result<Query, ImportError> {
    let mut template = Template::default();
    let mut label: Option<String> = None;
    let mut properties = String::new();

    for (column, raw) in record.iter() {
        if raw.trim().is_empty() {
            continue;
        }
        match column.ty {
            ColumnType::Label => {
                label = Some(template.bind(PropertyValue::Text(raw.trim().to_string())));
            }
            ty => {
                let key = sanitize_property_name(&column.name, warnings)?;
                let value = coerce(&column.name, ty, raw)?;
                let param = template.bind(value);
                let _ = write!(properties, ".property('{key}', {param})");
            }
        }
    }

    let text = format!(
        "{prefix}.addV({}){properties}",
        label.as_deref().unwrap_or_default()
    );
    Ok(template.finish(text))
}
