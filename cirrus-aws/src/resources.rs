//! Resource type configurations for the AWS catalog
//!
//! This module defines the mapping between stack node types and AWS
//! CloudFormation resource types, plus per-attribute property names.
//! Attributes without a mapping fall back to PascalCase conversion
//! at synthesis time.

/// Attribute mapping: (node attribute name, AWS property name)
pub type AttrMapping = (&'static str, &'static str);

/// Resource type configuration
pub struct ResourceConfig {
    /// Node type name used in stack declarations (e.g., "sns_topic")
    pub resource_type: &'static str,
    /// AWS CloudFormation type name (e.g., "AWS::SNS::Topic")
    pub aws_type_name: &'static str,
    /// Attribute name mappings
    pub attributes: &'static [AttrMapping],
}

pub const SNS_TOPIC_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "sns_topic",
    aws_type_name: "AWS::SNS::Topic",
    attributes: &[
        ("display_name", "DisplayName"),
        ("subscriptions", "Subscription"),
        ("policy_statements", "ResourcePolicyStatements"),
    ],
};

pub const VPC_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "vpc",
    aws_type_name: "AWS::EC2::VPC",
    attributes: &[
        ("nat_gateways", "NatGateways"),
        ("subnet_configuration", "SubnetConfiguration"),
    ],
};

pub const SECURITY_GROUP_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "security_group",
    aws_type_name: "AWS::EC2::SecurityGroup",
    attributes: &[
        ("vpc", "VpcId"),
        ("ingress", "SecurityGroupIngress"),
    ],
};

pub const EFS_FILE_SYSTEM_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "efs_file_system",
    aws_type_name: "AWS::EFS::FileSystem",
    attributes: &[
        ("vpc", "VpcId"),
        ("encrypted", "Encrypted"),
        ("lifecycle_policy", "LifecyclePolicy"),
        ("performance_mode", "PerformanceMode"),
        ("throughput_mode", "ThroughputMode"),
        ("security_group", "SecurityGroup"),
    ],
};

pub const ECS_CLUSTER_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "ecs_cluster",
    aws_type_name: "AWS::ECS::Cluster",
    attributes: &[("vpc", "VpcId")],
};

pub const TASK_DEFINITION_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "task_definition",
    aws_type_name: "AWS::ECS::TaskDefinition",
    attributes: &[
        ("cpu", "Cpu"),
        ("memory_limit_mib", "Memory"),
        ("volumes", "Volumes"),
        ("containers", "ContainerDefinitions"),
    ],
};

pub const SCHEDULE_RULE_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "schedule_rule",
    aws_type_name: "AWS::Events::Rule",
    attributes: &[
        ("rule_name", "Name"),
        ("schedule", "ScheduleExpression"),
        ("description", "Description"),
        ("target", "Target"),
    ],
};

pub const BACKUP_VAULT_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "backup_vault",
    aws_type_name: "AWS::Backup::BackupVault",
    attributes: &[
        ("access_policy", "AccessPolicy"),
        ("notification_topic", "NotificationTopic"),
        ("notification_events", "NotificationEvents"),
    ],
};

pub const BACKUP_PLAN_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "backup_plan",
    aws_type_name: "AWS::Backup::BackupPlan",
    attributes: &[
        ("rules", "BackupPlanRule"),
        ("selections", "BackupSelection"),
    ],
};

pub const METRIC_FILTER_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "metric_filter",
    aws_type_name: "AWS::Logs::MetricFilter",
    attributes: &[
        ("log_group", "LogGroupName"),
        ("pattern", "FilterPattern"),
        ("metric_name", "MetricName"),
        ("metric_namespace", "MetricNamespace"),
        ("metric_value", "MetricValue"),
    ],
};

pub const METRIC_ALARM_CONFIG: ResourceConfig = ResourceConfig {
    resource_type: "metric_alarm",
    aws_type_name: "AWS::CloudWatch::Alarm",
    attributes: &[
        ("alarm_name", "AlarmName"),
        ("alarm_description", "AlarmDescription"),
        ("metric_name", "MetricName"),
        ("metric_namespace", "Namespace"),
        ("statistic", "Statistic"),
        ("period_seconds", "Period"),
        ("evaluation_periods", "EvaluationPeriods"),
        ("threshold", "Threshold"),
        ("comparison_operator", "ComparisonOperator"),
        ("treat_missing_data", "TreatMissingData"),
        ("alarm_actions", "AlarmActions"),
    ],
};

/// All resource type configurations in this catalog
pub fn all_configs() -> &'static [&'static ResourceConfig] {
    &[
        &SNS_TOPIC_CONFIG,
        &VPC_CONFIG,
        &SECURITY_GROUP_CONFIG,
        &EFS_FILE_SYSTEM_CONFIG,
        &ECS_CLUSTER_CONFIG,
        &TASK_DEFINITION_CONFIG,
        &SCHEDULE_RULE_CONFIG,
        &BACKUP_VAULT_CONFIG,
        &BACKUP_PLAN_CONFIG,
        &METRIC_FILTER_CONFIG,
        &METRIC_ALARM_CONFIG,
    ]
}

/// Look up the configuration for a node type
pub fn config_for(resource_type: &str) -> Option<&'static ResourceConfig> {
    all_configs()
        .iter()
        .find(|c| c.resource_type == resource_type)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lookup() {
        let config = config_for("sns_topic").unwrap();
        assert_eq!(config.aws_type_name, "AWS::SNS::Topic");
        assert!(config_for("mystery").is_none());
    }

    #[test]
    fn every_config_has_a_distinct_type() {
        let configs = all_configs();
        for (i, a) in configs.iter().enumerate() {
            for b in &configs[i + 1..] {
                assert_ne!(a.resource_type, b.resource_type);
                assert_ne!(a.aws_type_name, b.aws_type_name);
            }
        }
    }

    #[test]
    fn security_group_maps_vpc_to_vpc_id() {
        let config = config_for("security_group").unwrap();
        assert!(config.attributes.contains(&("vpc", "VpcId")));
    }
}
