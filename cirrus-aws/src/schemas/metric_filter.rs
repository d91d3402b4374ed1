//! metric_filter schema definition (AWS::Logs::MetricFilter)

use cirrus_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// Returns the schema for metric_filter (AWS::Logs::MetricFilter)
pub fn metric_filter_schema() -> ResourceSchema {
    ResourceSchema::new("metric_filter")
        .attribute(
            AttributeSchema::new("log_group", AttributeType::String)
                .required()
                .with_description("Log group the filter reads from"),
        )
        .attribute(
            AttributeSchema::new("pattern", AttributeType::String)
                .required()
                .with_description("Term to match in log lines"),
        )
        .attribute(AttributeSchema::new("metric_name", AttributeType::String).required())
        .attribute(AttributeSchema::new("metric_namespace", AttributeType::String).required())
        .attribute(
            AttributeSchema::new("metric_value", AttributeType::String)
                .with_description("Value emitted per matching line"),
        )
}
