//! backup_plan schema definition (AWS::Backup::BackupPlan)

use cirrus_core::schema::{AttributeSchema, ResourceSchema, types};

/// Returns the schema for backup_plan (AWS::Backup::BackupPlan)
pub fn backup_plan_schema() -> ResourceSchema {
    ResourceSchema::new("backup_plan")
        .attribute(
            AttributeSchema::new("rules", types::block_list())
                .required()
                .with_description("Backup rules with schedule and retention"),
        )
        .attribute(
            AttributeSchema::new("selections", types::block_list())
                .required()
                .with_description("Resource selections covered by this plan"),
        )
}
