//! Resource - Representing resource declaration nodes

use std::collections::HashMap;

/// Unique identifier for a resource node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    /// Resource type (e.g., "sns_topic", "security_group")
    pub resource_type: String,
    /// Node name within the stack (e.g., "backup_alarm")
    pub name: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.name)
    }
}

/// Attribute value of a resource node
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
    /// Identity reference to another node in the same stack
    Ref(String),
    /// Reference to an attribute the engine synthesizes on another node
    /// (node_name, attribute_name)
    GetAtt(String, String),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Node name this value points at, if it is a reference
    pub fn referenced_node(&self) -> Option<&str> {
        match self {
            Value::Ref(name) | Value::GetAtt(name, _) => Some(name),
            _ => None,
        }
    }

    /// Collect every node name referenced by this value, recursively
    pub fn collect_refs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Value::Ref(name) | Value::GetAtt(name, _) => out.push(name),
            Value::List(items) => {
                for item in items {
                    item.collect_refs(out);
                }
            }
            Value::Map(map) => {
                for v in map.values() {
                    v.collect_refs(out);
                }
            }
            _ => {}
        }
    }
}

/// A single immutable resource declaration owned by the stack
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub attributes: HashMap<String, Value>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(resource_type, name),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// All node names this resource references through its attributes
    pub fn referenced_nodes(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        for value in self.attributes.values() {
            value.collect_refs(&mut refs);
        }
        refs
    }
}
