//! Stack - Ordered graph of resource declarations
//!
//! A Stack owns its resource nodes and the order they were declared in.
//! Nodes reference each other by name, and a reference may only point at
//! a node that was already declared, so construction is strictly
//! dependency-ordered. Nothing here touches the cloud; the synthesized
//! template is handed to an external provisioning engine.

use crate::resource::{Resource, ResourceId, Value};

/// Error raised while declaring resources
#[derive(Debug, Clone, thiserror::Error)]
pub enum StackError {
    #[error("Duplicate resource name '{name}' (already declared as {existing})")]
    DuplicateName { name: String, existing: String },

    #[error("Resource {id} references undeclared node '{referenced}'")]
    UnknownReference { id: ResourceId, referenced: String },

    #[error("Cannot amend unknown resource '{name}'")]
    UnknownResource { name: String },
}

/// The unit of declarative infrastructure this builder produces
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    region: String,
    resources: Vec<Resource>,
}

impl Stack {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            resources: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Declare a resource node.
    ///
    /// Rejects duplicate node names and references to nodes that have not
    /// been declared yet.
    pub fn add(&mut self, resource: Resource) -> Result<ResourceId, StackError> {
        if let Some(existing) = self.resource(&resource.id.name) {
            return Err(StackError::DuplicateName {
                name: resource.id.name.clone(),
                existing: existing.id.to_string(),
            });
        }

        for referenced in resource.referenced_nodes() {
            if self.resource(referenced).is_none() {
                return Err(StackError::UnknownReference {
                    id: resource.id.clone(),
                    referenced: referenced.to_string(),
                });
            }
        }

        let id = resource.id.clone();
        self.resources.push(resource);
        Ok(id)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id.name == name)
    }

    /// Re-open an already-declared node to append to one of its attributes.
    ///
    /// Declarations are otherwise immutable; this exists for the two
    /// construction steps that cannot be expressed at initial declaration
    /// time (the container mount point and the topic resource policy).
    pub fn amend(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Resource),
    ) -> Result<(), StackError> {
        let resource = self
            .resources
            .iter_mut()
            .find(|r| r.id.name == name)
            .ok_or_else(|| StackError::UnknownResource {
                name: name.to_string(),
            })?;
        f(resource);
        Ok(())
    }

    /// Append a value to a list attribute of an existing node, creating the
    /// list if it does not exist yet.
    pub fn append_to(&mut self, name: &str, key: &str, value: Value) -> Result<(), StackError> {
        self.amend(name, |resource| {
            match resource.attributes.get_mut(key) {
                Some(Value::List(items)) => items.push(value),
                _ => {
                    resource
                        .attributes
                        .insert(key.to_string(), Value::List(vec![value]));
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Number of nodes of a given resource type
    pub fn count_type(&self, resource_type: &str) -> usize {
        self.resources
            .iter()
            .filter(|r| r.id.resource_type == resource_type)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;

    #[test]
    fn add_and_lookup() {
        let mut stack = Stack::new("backup-runner", "us-east-1");
        stack.add(Resource::new("vpc", "vpc")).unwrap();

        assert_eq!(stack.len(), 1);
        assert_eq!(stack.resource("vpc").unwrap().id.resource_type, "vpc");
        assert_eq!(stack.count_type("vpc"), 1);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut stack = Stack::new("backup-runner", "us-east-1");
        stack.add(Resource::new("sns_topic", "backup_alarm")).unwrap();

        let err = stack
            .add(Resource::new("sns_topic", "backup_alarm"))
            .unwrap_err();
        assert!(matches!(err, StackError::DuplicateName { .. }));
    }

    #[test]
    fn forward_reference_rejected() {
        let mut stack = Stack::new("backup-runner", "us-east-1");

        let sg = Resource::new("security_group", "efs_sg")
            .with_attribute("vpc", Value::Ref("vpc".to_string()));
        let err = stack.add(sg).unwrap_err();
        assert!(matches!(err, StackError::UnknownReference { .. }));
    }

    #[test]
    fn reference_to_declared_node_ok() {
        let mut stack = Stack::new("backup-runner", "us-east-1");
        stack.add(Resource::new("vpc", "vpc")).unwrap();

        let sg = Resource::new("security_group", "efs_sg")
            .with_attribute("vpc", Value::Ref("vpc".to_string()));
        assert!(stack.add(sg).is_ok());
    }

    #[test]
    fn append_to_creates_and_extends_list() {
        let mut stack = Stack::new("backup-runner", "us-east-1");
        stack.add(Resource::new("sns_topic", "backup_alarm")).unwrap();

        stack
            .append_to("backup_alarm", "policy_statements", Value::Int(1))
            .unwrap();
        stack
            .append_to("backup_alarm", "policy_statements", Value::Int(2))
            .unwrap();

        let topic = stack.resource("backup_alarm").unwrap();
        match topic.attribute("policy_statements").unwrap() {
            Value::List(items) => assert_eq!(items.len(), 2),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn amend_unknown_resource_fails() {
        let mut stack = Stack::new("backup-runner", "us-east-1");
        let err = stack.amend("nope", |_| {}).unwrap_err();
        assert!(matches!(err, StackError::UnknownResource { .. }));
    }
}
