//! JSON Schema validation of assembled themes.

use serde_json::Value;
use tracing::debug;

use campex_core::{
    application::ports::ThemeSchema,
    domain::FieldError,
    error::{ExportError, ExportResult},
};

/// Schema that ships with the binary.
const BUILTIN_SCHEMA: &str = include_str!("theme.schema.json");

/// Validates themes against a compiled JSON Schema.
///
/// Reports every failure, not just the first.
pub struct JsonSchemaValidator {
    validator: jsonschema::Validator,
}

impl JsonSchemaValidator {
    /// Compile a schema document.
    pub fn new(schema: &Value) -> ExportResult<Self> {
        let validator = jsonschema::validator_for(schema).map_err(|e| ExportError::Configuration {
            message: format!("invalid theme schema: {e}"),
        })?;
        Ok(Self { validator })
    }

    /// The built-in theme schema.
    pub fn builtin() -> ExportResult<Self> {
        let schema: Value = serde_json::from_str(BUILTIN_SCHEMA).map_err(|e| ExportError::Internal {
            message: format!("built-in theme schema is not JSON: {e}"),
        })?;
        Self::new(&schema)
    }
}

impl ThemeSchema for JsonSchemaValidator {
    fn validate(&self, theme: &Value) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = self
            .validator
            .iter_errors(theme)
            .map(|e| FieldError::new(e.instance_path.to_string(), e.to_string()))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            debug!(count = errors.len(), "Theme rejected by schema");
            Err(errors)
        }
    }
}
