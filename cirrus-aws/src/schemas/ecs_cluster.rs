//! ecs_cluster schema definition (AWS::ECS::Cluster)

use cirrus_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns the schema for ecs_cluster (AWS::ECS::Cluster)
pub fn ecs_cluster_schema() -> ResourceSchema {
    ResourceSchema::new("ecs_cluster").attribute(
        AttributeSchema::new("vpc", AttributeType::String)
            .required()
            .with_description("The VPC tasks are launched into"),
    )
}
