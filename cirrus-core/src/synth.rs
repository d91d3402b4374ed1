//! Synth - Render a stack into a deployment template
//!
//! The synthesizer validates every node against the catalog supplied by the
//! AWS crate, maps attribute names to their provider-side names, and renders
//! references as template intrinsics. The resulting template is what gets
//! handed to the external provisioning engine; no API calls happen here.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::json;

use crate::resource::{Resource, ResourceId, Value};
use crate::schema::ResourceSchema;
use crate::stack::Stack;

/// Provider-side naming for one resource type
#[derive(Debug, Clone)]
pub struct TypeMapping {
    /// CloudFormation type name (e.g., "AWS::SNS::Topic")
    pub aws_type_name: String,
    /// Attribute name mappings (node attribute -> provider property)
    pub attributes: Vec<(String, String)>,
}

impl TypeMapping {
    pub fn property_name(&self, attr: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(dsl, _)| dsl == attr)
            .map(|(_, aws)| aws.as_str())
    }
}

/// Schemas and name mappings for every supported resource type
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub schemas: HashMap<String, ResourceSchema>,
    pub mappings: HashMap<String, TypeMapping>,
}

/// Error raised during synthesis
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("Unknown resource type '{resource_type}' for node '{name}'")]
    UnknownResourceType { resource_type: String, name: String },

    #[error("Validation failed for {id}: {}", messages.join("; "))]
    Validation { id: ResourceId, messages: Vec<String> },

    #[error("Failed to serialize template: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A single rendered resource in the template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResource {
    #[serde(rename = "Type")]
    pub type_name: String,
    #[serde(rename = "Properties")]
    pub properties: serde_json::Value,
}

/// The rendered deployment template
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    #[serde(rename = "FormatVersion")]
    pub format_version: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, TemplateResource>,
}

impl Template {
    pub const FORMAT_VERSION: &'static str = "2010-09-09";

    pub fn to_json_pretty(&self) -> Result<String, SynthError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether any rendered resource has the given provider type name
    pub fn contains_type(&self, aws_type_name: &str) -> bool {
        self.resources
            .values()
            .any(|r| r.type_name == aws_type_name)
    }
}

/// Renders stacks into templates using a catalog
pub struct Synthesizer {
    catalog: Catalog,
}

impl Synthesizer {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Validate and render the whole stack. Any failure aborts synthesis;
    /// no partial template is produced.
    pub fn synth(&self, stack: &Stack) -> Result<Template, SynthError> {
        let mut resources = BTreeMap::new();

        for resource in stack.resources() {
            let rendered = self.render_resource(resource)?;
            resources.insert(logical_id(&resource.id.name), rendered);
        }

        Ok(Template {
            format_version: Template::FORMAT_VERSION.to_string(),
            description: format!("{} stack", stack.name()),
            region: stack.region().to_string(),
            resources,
        })
    }

    fn render_resource(&self, resource: &Resource) -> Result<TemplateResource, SynthError> {
        let resource_type = &resource.id.resource_type;

        let schema = self.catalog.schemas.get(resource_type).ok_or_else(|| {
            SynthError::UnknownResourceType {
                resource_type: resource_type.clone(),
                name: resource.id.name.clone(),
            }
        })?;

        schema
            .validate(&resource.attributes)
            .map_err(|errors| SynthError::Validation {
                id: resource.id.clone(),
                messages: errors.iter().map(|e| e.to_string()).collect(),
            })?;

        let mapping = self.catalog.mappings.get(resource_type).ok_or_else(|| {
            SynthError::UnknownResourceType {
                resource_type: resource_type.clone(),
                name: resource.id.name.clone(),
            }
        })?;

        let mut properties = serde_json::Map::new();
        // Sorted for stable output
        let mut attrs: Vec<_> = resource.attributes.iter().collect();
        attrs.sort_by(|a, b| a.0.cmp(b.0));

        for (attr, value) in attrs {
            let property = mapping
                .property_name(attr)
                .map(str::to_string)
                .unwrap_or_else(|| pascal_case(attr));
            properties.insert(property, render_value(value));
        }

        Ok(TemplateResource {
            type_name: mapping.aws_type_name.clone(),
            properties: serde_json::Value::Object(properties),
        })
    }
}

/// Render an attribute value as template JSON. References become
/// intrinsics resolved by the external engine.
fn render_value(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => json!(s),
        Value::Int(n) => json!(n),
        Value::Bool(b) => json!(b),
        Value::List(items) => {
            serde_json::Value::Array(items.iter().map(render_value).collect())
        }
        Value::Map(map) => {
            let mut rendered = serde_json::Map::new();
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (k, v) in entries {
                rendered.insert(pascal_case(k), render_value(v));
            }
            serde_json::Value::Object(rendered)
        }
        Value::Ref(name) => json!({ "Ref": logical_id(name) }),
        Value::GetAtt(name, attr) => {
            json!({ "Fn::GetAtt": [logical_id(name), pascal_case(attr)] })
        }
    }
}

/// Convert a snake_case node name to a PascalCase logical id
pub fn logical_id(name: &str) -> String {
    pascal_case(name)
}

/// snake_case -> PascalCase (also strips '-' and '.')
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c == '_' || c == '-' || c == '.' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
