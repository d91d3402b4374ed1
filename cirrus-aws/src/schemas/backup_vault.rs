//! backup_vault schema definition (AWS::Backup::BackupVault)

use cirrus_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema for backup_vault (AWS::Backup::BackupVault)
pub fn backup_vault_schema() -> ResourceSchema {
    ResourceSchema::new("backup_vault")
        .with_description("Managed vault governing protection of backup data")
        .attribute(
            AttributeSchema::new("access_policy", types::block_list())
                .required()
                .with_description("Policy statements controlling vault operations"),
        )
        .attribute(
            AttributeSchema::new("notification_topic", AttributeType::String)
                .with_description("Topic receiving vault lifecycle notifications"),
        )
        .attribute(
            AttributeSchema::new("notification_events", types::string_list())
                .with_description("Vault lifecycle events to notify on"),
        )
}
