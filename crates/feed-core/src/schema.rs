//! Field schema definitions for synthetic record generation.
//!
//! A schema is an ordered list of named, typed fields. Field order is
//! significant only for delimited replay files, where the i-th column
//! of a line maps onto the i-th field name.

use serde::{Deserialize, Serialize};

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error parsing the schema JSON
    #[error("Failed to parse schema JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Schema contains no fields
    #[error("Schema must define at least one field")]
    Empty,
}

/// The closed set of field types a schema may declare.
///
/// `Date/Time` and `Date/time` are accepted as spellings of
/// [`TypeTag::DateTime`] for compatibility with existing application
/// definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    String,
    Integer,
    Long,
    Double,
    Boolean,
    #[serde(rename = "Date/Time", alias = "Date/time", alias = "DateTime")]
    DateTime,
    Location,
}

/// A single named, typed field in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name. The name `"id"` is special-cased during synthetic
    /// generation and receives a wall-clock timestamp.
    pub name: String,

    /// Field type
    #[serde(rename = "type")]
    pub field_type: TypeTag,
}

impl FieldSpec {
    /// Create a new field spec.
    pub fn new(name: impl Into<String>, field_type: TypeTag) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// An ordered sequence of field specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Field definitions, in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    /// Create a schema from a list of fields.
    ///
    /// Returns [`SchemaError::Empty`] if the list is empty.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        Ok(Self { fields })
    }

    /// Parse a schema from a JSON document of the form
    /// `{"fields": [{"name": "...", "type": "..."}, ...]}`.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_str(json)?;
        if schema.fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        Ok(schema)
    }

    /// Number of fields in the schema.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no fields. Always false for a schema
    /// built through the checked constructors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_json() {
        let json = r#"{
            "fields": [
                {"name": "id", "type": "Long"},
                {"name": "name", "type": "String"},
                {"name": "ts", "type": "Date/Time"},
                {"name": "pos", "type": "Location"}
            ]
        }"#;

        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema.len(), 4);
        assert_eq!(schema.fields[0].name, "id");
        assert_eq!(schema.fields[0].field_type, TypeTag::Long);
        assert_eq!(schema.fields[2].field_type, TypeTag::DateTime);
        assert_eq!(schema.fields[3].field_type, TypeTag::Location);
    }

    #[test]
    fn test_datetime_spelling_variants() {
        let json = r#"{"fields": [{"name": "t", "type": "Date/time"}]}"#;
        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema.fields[0].field_type, TypeTag::DateTime);
    }

    #[test]
    fn test_empty_schema_rejected() {
        let result = Schema::from_json(r#"{"fields": []}"#);
        assert!(matches!(result, Err(SchemaError::Empty)));

        let result = Schema::new(vec![]);
        assert!(matches!(result, Err(SchemaError::Empty)));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = Schema::from_json(r#"{"fields": [{"name": "x", "type": "Blob"}]}"#);
        assert!(matches!(result, Err(SchemaError::JsonError(_))));
    }

    #[test]
    fn test_field_names_preserve_order() {
        let schema = Schema::new(vec![
            FieldSpec::new("b", TypeTag::Integer),
            FieldSpec::new("a", TypeTag::Integer),
        ])
        .unwrap();
        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
