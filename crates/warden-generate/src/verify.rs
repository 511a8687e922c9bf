//! JSON Schema verification of generator output.
//!
//! `VerifiedGenerator` wraps any `ContentGenerator` and validates what it
//! returns against a per-action schema before the lifecycle manager sees
//! it. A violation is reported as `GenerationFailed`, so the action ends in
//! `failed` instead of storing malformed output.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::warn;

use warden_contracts::{
    action::GeneratedContent,
    error::{WardenError, WardenResult},
};
use warden_core::traits::ContentGenerator;

/// Every output needs a non-empty `result`.
pub fn base_schema() -> Value {
    json!({
        "type": "object",
        "required": ["result"],
        "properties": {
            "result": { "type": "string", "minLength": 1 }
        }
    })
}

/// Improvements must also carry a complete replacement document.
pub fn improve_schema() -> Value {
    json!({
        "type": "object",
        "required": ["result", "changes"],
        "properties": {
            "result": { "type": "string", "minLength": 1 },
            "changes": {
                "type": "object",
                "required": ["title", "content"],
                "properties": {
                    "title": { "type": "string", "minLength": 1 },
                    "content": { "type": "string" }
                }
            }
        }
    })
}

/// Collect every schema violation in `instance`. An empty list means valid.
pub fn check(schema: &Value, instance: &Value) -> Vec<String> {
    match jsonschema::validator_for(schema) {
        Ok(validator) => validator
            .iter_errors(instance)
            .map(|error| format!("at '{}': {}", error.instance_path, error))
            .collect(),
        Err(e) => vec![format!("invalid JSON Schema document: {e}")],
    }
}

pub struct VerifiedGenerator<G> {
    inner: G,
    schemas: HashMap<String, Value>,
    default_schema: Value,
}

impl<G> VerifiedGenerator<G> {
    /// Wrap `inner` with the built-in schemas.
    pub fn new(inner: G) -> Self {
        let mut schemas = HashMap::new();
        schemas.insert("improve_document".to_string(), improve_schema());
        Self {
            inner,
            schemas,
            default_schema: base_schema(),
        }
    }

    /// Replace the schema for one action type.
    pub fn with_schema(mut self, action_type: impl Into<String>, schema: Value) -> Self {
        self.schemas.insert(action_type.into(), schema);
        self
    }

    pub fn schema_for(&self, action_type: &str) -> &Value {
        self.schemas.get(action_type).unwrap_or(&self.default_schema)
    }
}

#[async_trait]
impl<G: ContentGenerator> ContentGenerator for VerifiedGenerator<G> {
    async fn generate(
        &self,
        action_type: &str,
        title: &str,
        content: &str,
    ) -> WardenResult<GeneratedContent> {
        let generated = self.inner.generate(action_type, title, content).await?;

        let instance = serde_json::to_value(&generated).map_err(|e| WardenError::GenerationFailed {
            reason: format!("generated output is not serializable: {}", e),
        })?;

        let violations = check(self.schema_for(action_type), &instance);
        if violations.is_empty() {
            return Ok(generated);
        }

        warn!(action_type = %action_type, violations = violations.len(), "generated output rejected");
        Err(WardenError::GenerationFailed {
            reason: format!(
                "output for '{}' failed verification: {}",
                action_type,
                violations.join("; ")
            ),
        })
    }
}
