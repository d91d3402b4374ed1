//! metric_alarm schema definition (AWS::CloudWatch::Alarm)

use cirrus_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema for metric_alarm (AWS::CloudWatch::Alarm)
pub fn metric_alarm_schema() -> ResourceSchema {
    ResourceSchema::new("metric_alarm")
        .attribute(AttributeSchema::new("alarm_name", AttributeType::String))
        .attribute(AttributeSchema::new("alarm_description", AttributeType::String))
        .attribute(AttributeSchema::new("metric_name", AttributeType::String).required())
        .attribute(AttributeSchema::new("metric_namespace", AttributeType::String).required())
        .attribute(
            AttributeSchema::new(
                "statistic",
                AttributeType::Enum(vec![
                    "sum".to_string(),
                    "average".to_string(),
                    "minimum".to_string(),
                    "maximum".to_string(),
                ]),
            )
            .required(),
        )
        .attribute(
            AttributeSchema::new("period_seconds", AttributeType::Int)
                .required()
                .with_description("Evaluation period length in seconds"),
        )
        .attribute(AttributeSchema::new("evaluation_periods", AttributeType::Int).required())
        .attribute(AttributeSchema::new("threshold", AttributeType::Int).required())
        .attribute(
            AttributeSchema::new(
                "comparison_operator",
                AttributeType::Enum(vec![
                    "greater_than_or_equal_to_threshold".to_string(),
                    "greater_than_threshold".to_string(),
                    "less_than_threshold".to_string(),
                    "less_than_or_equal_to_threshold".to_string(),
                ]),
            )
            .required(),
        )
        .attribute(
            AttributeSchema::new(
                "treat_missing_data",
                AttributeType::Enum(vec![
                    "breaching".to_string(),
                    "not_breaching".to_string(),
                    "ignore".to_string(),
                    "missing".to_string(),
                ]),
            )
            .with_description("How evaluation treats periods with no data"),
        )
        .attribute(
            AttributeSchema::new("alarm_actions", types::string_list())
                .with_description("Topics notified when the alarm fires"),
        )
}
