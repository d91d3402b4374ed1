//! AWS resource schema definitions
//!
//! One module per resource type, each returning a `ResourceSchema` for
//! validation before synthesis.

mod backup_plan;
mod backup_vault;
mod ecs_cluster;
mod efs_file_system;
mod metric_alarm;
mod metric_filter;
mod schedule_rule;
mod security_group;
mod sns_topic;
mod task_definition;
mod vpc;

use std::collections::HashMap;

use cirrus_core::schema::ResourceSchema;
use cirrus_core::synth::{Catalog, TypeMapping};

use crate::resources;

pub use backup_plan::backup_plan_schema;
pub use backup_vault::backup_vault_schema;
pub use ecs_cluster::ecs_cluster_schema;
pub use efs_file_system::efs_file_system_schema;
pub use metric_alarm::metric_alarm_schema;
pub use metric_filter::metric_filter_schema;
pub use schedule_rule::schedule_rule_schema;
pub use security_group::security_group_schema;
pub use sns_topic::sns_topic_schema;
pub use task_definition::task_definition_schema;
pub use vpc::vpc_schema;

/// Returns all schemas in this catalog
pub fn all_schemas() -> Vec<ResourceSchema> {
    vec![
        sns_topic_schema(),
        vpc_schema(),
        security_group_schema(),
        efs_file_system_schema(),
        ecs_cluster_schema(),
        task_definition_schema(),
        schedule_rule_schema(),
        backup_vault_schema(),
        backup_plan_schema(),
        metric_filter_schema(),
        metric_alarm_schema(),
    ]
}

/// Build the full catalog consumed by the synthesizer: schemas for
/// validation plus CloudFormation name mappings for rendering.
pub fn catalog() -> Catalog {
    let mut schemas = HashMap::new();
    for schema in all_schemas() {
        schemas.insert(schema.resource_type.clone(), schema);
    }

    let mut mappings = HashMap::new();
    for config in resources::all_configs() {
        mappings.insert(
            config.resource_type.to_string(),
            TypeMapping {
                aws_type_name: config.aws_type_name.to_string(),
                attributes: config
                    .attributes
                    .iter()
                    .map(|(dsl, aws)| (dsl.to_string(), aws.to_string()))
                    .collect(),
            },
        );
    }

    Catalog { schemas, mappings }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_has_a_mapping() {
        let catalog = catalog();
        for resource_type in catalog.schemas.keys() {
            assert!(
                catalog.mappings.contains_key(resource_type),
                "no mapping for {}",
                resource_type
            );
        }
        assert_eq!(catalog.schemas.len(), catalog.mappings.len());
    }

    #[test]
    fn schema_types_match_config_types() {
        for schema in all_schemas() {
            assert!(
                resources::config_for(&schema.resource_type).is_some(),
                "no config for {}",
                schema.resource_type
            );
        }
    }
}
