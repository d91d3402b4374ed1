//! efs_file_system schema definition (AWS::EFS::FileSystem)

use cirrus_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns the schema for efs_file_system (AWS::EFS::FileSystem)
pub fn efs_file_system_schema() -> ResourceSchema {
    ResourceSchema::new("efs_file_system")
        .with_description("Network-attached elastic file store")
        .attribute(
            AttributeSchema::new("vpc", AttributeType::String)
                .required()
                .with_description("The VPC the file system's mount targets live in"),
        )
        .attribute(
            AttributeSchema::new("encrypted", AttributeType::Bool)
                .required()
                .with_description("Whether data at rest is encrypted"),
        )
        .attribute(
            AttributeSchema::new(
                "lifecycle_policy",
                AttributeType::Enum(vec![
                    "after_7_days".to_string(),
                    "after_14_days".to_string(),
                    "after_30_days".to_string(),
                    "after_60_days".to_string(),
                    "after_90_days".to_string(),
                ]),
            )
            .with_description("When to transition files to infrequent access"),
        )
        .attribute(
            AttributeSchema::new(
                "performance_mode",
                AttributeType::Enum(vec!["general_purpose".to_string(), "max_io".to_string()]),
            )
            .with_description("File system performance mode"),
        )
        .attribute(
            AttributeSchema::new(
                "throughput_mode",
                AttributeType::Enum(vec!["bursting".to_string(), "provisioned".to_string()]),
            )
            .with_description("File system throughput mode"),
        )
        .attribute(
            AttributeSchema::new("security_group", AttributeType::String)
                .with_description("Security group guarding the mount targets"),
        )
}
