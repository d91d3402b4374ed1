//! schedule_rule schema definition (AWS::Events::Rule)

use cirrus_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema for schedule_rule (AWS::Events::Rule)
pub fn schedule_rule_schema() -> ResourceSchema {
    ResourceSchema::new("schedule_rule")
        .attribute(
            AttributeSchema::new("rule_name", AttributeType::String)
                .with_description("Rule name shown in the console"),
        )
        .attribute(
            AttributeSchema::new("schedule", AttributeType::String)
                .required()
                .with_description("Cron schedule expression, e.g. cron(0 0 * * ? *)"),
        )
        .attribute(AttributeSchema::new("description", AttributeType::String))
        .attribute(
            AttributeSchema::new("target", types::block())
                .required()
                .with_description(
                    "Task target: cluster, task definition, subnet selection, \
                     platform version, and security groups",
                ),
        )
}
