//! task_definition schema definition (AWS::ECS::TaskDefinition)

use cirrus_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema for task_definition (AWS::ECS::TaskDefinition)
pub fn task_definition_schema() -> ResourceSchema {
    ResourceSchema::new("task_definition")
        .with_description("Fargate container workload specification")
        .attribute(
            AttributeSchema::new("cpu", AttributeType::Int)
                .required()
                .with_description("CPU units reserved for the task"),
        )
        .attribute(
            AttributeSchema::new("memory_limit_mib", AttributeType::Int)
                .required()
                .with_description("Memory limit in MiB"),
        )
        .attribute(
            AttributeSchema::new("volumes", types::block_list()).with_description(
                "Mountable volumes; each names a file system, root directory, \
                 and transit encryption setting",
            ),
        )
        .attribute(
            AttributeSchema::new("containers", types::block_list())
                .with_description("Container definitions with image, logging, and mount points"),
        )
}
