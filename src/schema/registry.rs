//! Column name to type mapping of a vertex file.

use std::collections::HashMap;

use super::types::ColumnType;
use crate::error_handling::{ConfigurationError, ImportError, TypeCoercionError, WarningTally};
use crate::query::sanitize_property_name;

/// One declared column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

/// Ordered column declarations of a vertex file.
///
/// Built once from the header row and the type row, then shared read-only
/// by every record of the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    columns: Vec<Column>,
}

impl TypeRegistry {
    /// Builds the registry from the header row and the type-declaration row.
    ///
    /// Column names are trimmed and compared lower-cased; type tokens are
    /// trimmed and lower-cased. Property columns must also map to distinct
    /// property keys, so `Zip Code` and `zip_code` cannot both be declared.
    ///
    /// # Errors
    ///
    /// - `TypeCoercionError::UnsupportedType` for a type outside the supported set
    ///   (a missing type cell counts as an empty, unsupported type)
    /// - `ConfigurationError` for empty or duplicate column names, colliding
    ///   property keys, or more than one `label` column
    pub fn from_declaration<H, T>(headers: &[H], types: &[T]) -> Result<Self, ImportError>
    where
        H: AsRef<str>,
        T: AsRef<str>,
    {
        let mut columns = Vec::with_capacity(headers.len());
        let mut names: HashMap<String, String> = HashMap::new();
        let mut keys: HashMap<String, String> = HashMap::new();
        let mut label: Option<String> = None;

        for (position, header) in headers.iter().enumerate() {
            let name = header.as_ref().trim().to_string();
            if name.is_empty() {
                return Err(ConfigurationError::EmptyColumnName {
                    position: position + 1,
                }
                .into());
            }
            let folded = name.to_lowercase();
            if let Some(first) = names.insert(folded.clone(), name.clone()) {
                return Err(ConfigurationError::DuplicateColumn {
                    first,
                    second: name,
                    key: folded,
                }
                .into());
            }

            let declared = types
                .get(position)
                .map(|t| t.as_ref().trim().to_lowercase())
                .unwrap_or_default();
            let ty = ColumnType::parse_declared(&declared).ok_or_else(|| {
                TypeCoercionError::UnsupportedType {
                    column: name.clone(),
                    declared: declared.clone(),
                }
            })?;

            if ty == ColumnType::Label {
                if let Some(first) = label.take() {
                    return Err(ConfigurationError::MultipleLabelColumns {
                        first,
                        second: name,
                    }
                    .into());
                }
                label = Some(name.clone());
            } else {
                // rename warnings are recorded per record when queries are built
                let key = sanitize_property_name(&name, &mut WarningTally::new())?;
                if let Some(first) = keys.insert(key.clone(), name.clone()) {
                    return Err(ConfigurationError::DuplicateColumn {
                        first,
                        second: name,
                        key,
                    }
                    .into());
                }
            }

            columns.push(Column { name, ty });
        }

        if types.len() > headers.len() {
            log::warn!(
                "Type row declares {} types for {} columns; extra types ignored",
                types.len(),
                headers.len()
            );
        }

        Ok(TypeRegistry { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Declared type of `column`, if it exists.
    pub fn type_of(&self, column: &str) -> Option<ColumnType> {
        self.columns.iter().find(|c| c.name == column).map(|c| c.ty)
    }
}
