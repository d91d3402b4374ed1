//! Schema - Type schemas for resource declarations
//!
//! The AWS catalog crate defines a schema for each resource type,
//! enabling validation before a template is rendered.

use std::collections::HashMap;
use std::fmt;

use crate::resource::Value;

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    String,
    Int,
    Bool,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    List(Box<AttributeType>),
    Map(Box<AttributeType>),
    /// Accepts any value; used for nested configuration blocks whose
    /// shape the provisioning engine validates
    Any,
}

impl AttributeType {
    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            // References resolve to strings once the engine materializes them
            (AttributeType::String, Value::String(_) | Value::Ref(_) | Value::GetAtt(_, _)) => {
                Ok(())
            }
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::Bool, Value::Bool(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::List(inner), Value::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    inner.validate(item).map_err(|e| TypeError::ListItemError {
                        index: i,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Map(inner), Value::Map(map)) => {
                for (k, v) in map {
                    inner.validate(v).map_err(|e| TypeError::MapValueError {
                        key: k.clone(),
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            (AttributeType::Any, _) => Ok(()),

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::Bool => "Bool".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::List(inner) => format!("List<{}>", inner.type_name()),
            AttributeType::Map(inner) => format!("Map<{}>", inner.type_name()),
            AttributeType::Any => "Any".to_string(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("List item at index {index}: {inner}")]
    ListItemError { index: usize, inner: Box<TypeError> },

    #[error("Map value for key '{key}': {inner}")]
    MapValueError { key: String, inner: Box<TypeError> },
}

impl Value {
    fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::List(_) => "List".to_string(),
            Value::Map(_) => "Map".to_string(),
            Value::Ref(name) => format!("Ref({})", name),
            Value::GetAtt(name, attr) => format!("GetAtt({}.{})", name, attr),
        }
    }
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    pub description: Option<String>,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            required: false,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: HashMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: HashMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Validate resource attributes
    pub fn validate(&self, attributes: &HashMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        for (name, schema) in &self.attributes {
            if schema.required && !attributes.contains_key(name) {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        for (name, value) in attributes {
            if let Some(schema) = self.attributes.get(name)
                && let Err(e) = schema.attr_type.validate(value)
            {
                errors.push(e);
            }
            // Unknown attributes are allowed (for flexibility)
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Helper functions for common types
pub mod types {
    use super::*;

    /// List of strings (or references that resolve to strings)
    pub fn string_list() -> AttributeType {
        AttributeType::List(Box::new(AttributeType::String))
    }

    /// Single nested configuration block with heterogeneous values
    pub fn block() -> AttributeType {
        AttributeType::Map(Box::new(AttributeType::Any))
    }

    /// List of nested configuration blocks
    pub fn block_list() -> AttributeType {
        AttributeType::List(Box::new(block()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_string_type() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::String("hello".to_string())).is_ok());
        assert!(t.validate(&Value::Int(42)).is_err());
    }

    #[test]
    fn refs_validate_as_strings() {
        let t = AttributeType::String;
        assert!(t.validate(&Value::Ref("vpc".to_string())).is_ok());
        assert!(
            t.validate(&Value::GetAtt("task".to_string(), "log_group_name".to_string()))
                .is_ok()
        );
    }

    #[test]
    fn validate_enum_type() {
        let t = AttributeType::Enum(vec!["bursting".to_string(), "provisioned".to_string()]);
        assert!(t.validate(&Value::String("bursting".to_string())).is_ok());
        assert!(t.validate(&Value::String("elastic".to_string())).is_err());
    }

    #[test]
    fn validate_list_of_maps() {
        let t = AttributeType::List(Box::new(AttributeType::Map(Box::new(
            AttributeType::String,
        ))));
        let mut rule = HashMap::new();
        rule.insert("peer_cidr".to_string(), Value::string("10.0.0.0/8"));
        assert!(t.validate(&Value::List(vec![Value::Map(rule)])).is_ok());
        assert!(t.validate(&Value::List(vec![Value::Int(1)])).is_err());
    }

    #[test]
    fn block_list_accepts_heterogeneous_maps() {
        let t = types::block_list();
        let mut rule = HashMap::new();
        rule.insert("port".to_string(), Value::Int(2049));
        rule.insert("peer".to_string(), Value::Ref("ecs_sg".to_string()));
        assert!(t.validate(&Value::List(vec![Value::Map(rule)])).is_ok());
        // Items must still be maps
        assert!(t.validate(&Value::List(vec![Value::Int(1)])).is_err());
    }

    #[test]
    fn missing_required_attribute() {
        let schema = ResourceSchema::new("sns_topic")
            .attribute(AttributeSchema::new("display_name", AttributeType::String).required());

        let attrs = HashMap::new();
        let result = schema.validate(&attrs);
        assert!(result.is_err());
    }

    #[test]
    fn validate_resource_schema() {
        let schema = ResourceSchema::new("efs_file_system")
            .attribute(AttributeSchema::new("encrypted", AttributeType::Bool).required())
            .attribute(AttributeSchema::new(
                "throughput_mode",
                AttributeType::Enum(vec!["bursting".to_string()]),
            ));

        let mut attrs = HashMap::new();
        attrs.insert("encrypted".to_string(), Value::Bool(true));
        attrs.insert("throughput_mode".to_string(), Value::string("bursting"));

        assert!(schema.validate(&attrs).is_ok());
    }
}
