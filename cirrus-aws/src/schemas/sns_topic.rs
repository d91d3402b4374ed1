//! sns_topic schema definition (AWS::SNS::Topic)

use cirrus_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema for sns_topic (AWS::SNS::Topic)
pub fn sns_topic_schema() -> ResourceSchema {
    ResourceSchema::new("sns_topic")
        .with_description("Publish-subscribe notification channel")
        .attribute(
            AttributeSchema::new("display_name", AttributeType::String)
                .required()
                .with_description("Human-readable topic name"),
        )
        .attribute(
            AttributeSchema::new("subscriptions", types::block_list())
                .with_description("Subscriptions, each with a protocol and endpoint"),
        )
        .attribute(
            AttributeSchema::new("policy_statements", types::block_list())
                .with_description("Resource policy statements granting publish access"),
        )
}
