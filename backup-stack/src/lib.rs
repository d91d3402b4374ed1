//! Backup Runner Stack
//!
//! Declares the infrastructure for a nightly backup task: a public-only
//! network, an encrypted shared file system, a Fargate task that mounts it,
//! a schedule rule that launches the task every night, a backup vault and
//! plan protecting the file system, and error alerting wired to a single
//! operator email. Construction is a linear, dependency-ordered sequence of
//! declarations; provisioning belongs to the external engine.

use std::collections::HashMap;

use cirrus_core::context::Context;
use cirrus_core::resource::{Resource, Value};
use cirrus_core::stack::{Stack, StackError};

pub const STACK_NAME: &str = "backup-runner";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default shipped in cirrus.json; building with it is a configuration error
pub const PLACEHOLDER_EMAIL: &str = "changeme@localhost";

pub const NFS_PORT: i64 = 2049;
pub const INTERNAL_CIDR: &str = "10.0.0.0/8";

pub const VOLUME_NAME: &str = "efsvolume";
pub const MOUNT_PATH: &str = "/mnt/efs";
pub const CONTAINER_NAME: &str = "backup-runner";
pub const CONTAINER_IMAGE: &str = "backup-runner:latest";
pub const TASK_CPU: i64 = 2048;
pub const TASK_MEMORY_MIB: i64 = 8192;
pub const LOG_STREAM_PREFIX: &str = "backup_runner";
pub const LOG_RETENTION_DAYS: i64 = 14;

/// Runs at 6am UTC every night
pub const NIGHTLY_SCHEDULE: &str = "cron(0 0 * * ? *)";

/// LATEST does not support mounting the shared file system
pub const FARGATE_PLATFORM_VERSION: &str = "1.4.0";

pub const BACKUP_SCHEDULE: &str = "cron(0 5 * * ? *)";
pub const BACKUP_RETENTION_DAYS: i64 = 35;

pub const METRIC_NAME: &str = "log_errors";
pub const METRIC_NAMESPACE: &str = "backup_runner";
pub const ERROR_PATTERN: &str = "ERROR";
pub const ALARM_NAME: &str = "backup_runner_alarm";
pub const ALARM_PERIOD_SECS: i64 = 3600;
pub const ALARM_THRESHOLD: i64 = 1;
pub const ALARM_EVALUATION_PERIODS: i64 = 1;

/// Destructive vault operations denied to every principal
pub const VAULT_DENIED_ACTIONS: [&str; 5] = [
    "backup:DeleteBackupVault",
    "backup:DeleteRecoveryPoint",
    "backup:UpdateRecoveryPointLifecycle",
    "backup:DeleteBackupVaultAccessPolicy",
    "backup:DeleteBackupVaultNotifications",
];

/// Vault lifecycle events routed to the alert topic
pub const VAULT_NOTIFICATION_EVENTS: [&str; 8] = [
    "BACKUP_JOB_EXPIRED",
    "BACKUP_JOB_FAILED",
    "COPY_JOB_FAILED",
    "COPY_JOB_STARTED",
    "RESTORE_JOB_COMPLETED",
    "RESTORE_JOB_FAILED",
    "RESTORE_JOB_STARTED",
    "RESTORE_JOB_SUCCESSFUL",
];

/// Error raised while building the stack definition
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(
        "Alert email is still the placeholder. Change it in cirrus.json or pass -c email=you@example.com"
    )]
    PlaceholderEmail,

    #[error("No alert email configured. Set it in cirrus.json or pass -c email=you@example.com")]
    MissingEmail,

    #[error(transparent)]
    Stack(#[from] StackError),
}

/// Build the backup-runner resource graph.
///
/// Fails before any resource is declared if the alert email is missing or
/// still the placeholder; no partial graph is ever produced.
pub fn build_stack(ctx: &Context) -> Result<Stack, BuildError> {
    let email = ctx.get("email").ok_or(BuildError::MissingEmail)?;
    if email == PLACEHOLDER_EMAIL {
        return Err(BuildError::PlaceholderEmail);
    }
    let region = ctx.get_or("region", DEFAULT_REGION);

    let mut stack = Stack::new(STACK_NAME, region);

    // Alert topic with its single human subscriber
    stack.add(
        Resource::new("sns_topic", "backup_alarm")
            .with_attribute("display_name", Value::string("backup_alarm"))
            .with_attribute(
                "subscriptions",
                Value::List(vec![block([
                    ("protocol", Value::string("email")),
                    ("endpoint", Value::string(email)),
                ])]),
            ),
    )?;

    // Public-only network. No NAT gateway; egress rides the public subnets
    stack.add(
        Resource::new("vpc", "vpc")
            .with_attribute("nat_gateways", Value::Int(0))
            .with_attribute(
                "subnet_configuration",
                Value::List(vec![block([
                    ("name", Value::string("public")),
                    ("subnet_type", Value::string("public")),
                ])]),
            ),
    )?;

    stack.add(
        Resource::new("security_group", "ecs_sg")
            .with_attribute("vpc", Value::Ref("vpc".to_string())),
    )?;

    stack.add(
        Resource::new("security_group", "efs_sg")
            .with_attribute("vpc", Value::Ref("vpc".to_string()))
            .with_attribute(
                "ingress",
                Value::List(vec![
                    block([
                        ("peer_security_group", Value::Ref("ecs_sg".to_string())),
                        ("protocol", Value::string("tcp")),
                        ("port", Value::Int(NFS_PORT)),
                        ("description", Value::string("Allow backup runner access")),
                    ]),
                    // Open to the internal network as well
                    block([
                        ("peer_cidr", Value::string(INTERNAL_CIDR)),
                        ("protocol", Value::string("tcp")),
                        ("port", Value::Int(NFS_PORT)),
                        ("description", Value::string("Allow backup runner access")),
                    ]),
                ]),
            ),
    )?;

    stack.add(
        Resource::new("efs_file_system", "file_system")
            .with_attribute("vpc", Value::Ref("vpc".to_string()))
            .with_attribute("encrypted", Value::Bool(true))
            .with_attribute("lifecycle_policy", Value::string("after_7_days"))
            .with_attribute("performance_mode", Value::string("general_purpose"))
            .with_attribute("throughput_mode", Value::string("bursting"))
            .with_attribute("security_group", Value::Ref("efs_sg".to_string())),
    )?;

    stack.add(
        Resource::new("ecs_cluster", "cluster")
            .with_attribute("vpc", Value::Ref("vpc".to_string())),
    )?;

    stack.add(
        Resource::new("task_definition", "task_definition")
            .with_attribute("cpu", Value::Int(TASK_CPU))
            .with_attribute("memory_limit_mib", Value::Int(TASK_MEMORY_MIB))
            .with_attribute(
                "volumes",
                Value::List(vec![block([
                    ("name", Value::string(VOLUME_NAME)),
                    ("file_system", Value::Ref("file_system".to_string())),
                    ("root_directory", Value::string("/")),
                    ("transit_encryption", Value::string("enabled")),
                ])]),
            )
            .with_attribute(
                "containers",
                Value::List(vec![block([
                    ("name", Value::string(CONTAINER_NAME)),
                    ("image", Value::string(CONTAINER_IMAGE)),
                    ("cpu", Value::Int(TASK_CPU)),
                    ("memory_limit_mib", Value::Int(TASK_MEMORY_MIB)),
                    ("log_stream_prefix", Value::string(LOG_STREAM_PREFIX)),
                    ("log_retention_days", Value::Int(LOG_RETENTION_DAYS)),
                ])]),
            ),
    )?;

    // The mount point cannot be declared with the container above; the
    // volume-bearing task definition must exist first, so the node is
    // re-opened to attach it.
    stack.amend("task_definition", |task| {
        if let Some(Value::List(containers)) = task.attributes.get_mut("containers")
            && let Some(Value::Map(container)) = containers.first_mut()
        {
            container.insert(
                "mount_points".to_string(),
                Value::List(vec![block([
                    ("container_path", Value::string(MOUNT_PATH)),
                    ("read_only", Value::Bool(false)),
                    ("source_volume", Value::string(VOLUME_NAME)),
                ])]),
            );
        }
    })?;

    stack.add(
        Resource::new("schedule_rule", "scheduled_run")
            .with_attribute("rule_name", Value::string("backup_runner"))
            .with_attribute("schedule", Value::string(NIGHTLY_SCHEDULE))
            .with_attribute(
                "description",
                Value::string("Starts the backup runner task every night"),
            )
            .with_attribute(
                "target",
                block([
                    ("cluster", Value::Ref("cluster".to_string())),
                    ("task_definition", Value::Ref("task_definition".to_string())),
                    ("subnet_type", Value::string("public")),
                    ("platform_version", Value::string(FARGATE_PLATFORM_VERSION)),
                    (
                        "security_groups",
                        Value::List(vec![Value::Ref("ecs_sg".to_string())]),
                    ),
                ]),
            ),
    )?;

    // Status topic, declared but not subscribed; reserved for future wiring
    stack.add(
        Resource::new("sns_topic", "backup_topic")
            .with_attribute("display_name", Value::string("Backup status")),
    )?;

    stack.add(
        Resource::new("backup_vault", "vault")
            .with_attribute(
                "access_policy",
                Value::List(vec![block([
                    ("effect", Value::string("deny")),
                    ("principal", Value::string("*")),
                    ("actions", string_values(&VAULT_DENIED_ACTIONS)),
                    ("resources", Value::List(vec![Value::string("*")])),
                ])]),
            )
            .with_attribute("notification_topic", Value::Ref("backup_alarm".to_string()))
            .with_attribute("notification_events", string_values(&VAULT_NOTIFICATION_EVENTS)),
    )?;

    stack.add(
        Resource::new("backup_plan", "backup_plan")
            .with_attribute(
                "rules",
                Value::List(vec![block([
                    ("rule_name", Value::string("daily")),
                    ("schedule", Value::string(BACKUP_SCHEDULE)),
                    ("delete_after_days", Value::Int(BACKUP_RETENTION_DAYS)),
                ])]),
            )
            .with_attribute(
                "selections",
                Value::List(vec![block([
                    ("name", Value::string("selection")),
                    (
                        "resources",
                        Value::List(vec![Value::Ref("file_system".to_string())]),
                    ),
                ])]),
            ),
    )?;

    stack.add(
        Resource::new("metric_filter", "log_errors")
            .with_attribute(
                "log_group",
                Value::GetAtt("task_definition".to_string(), "log_group_name".to_string()),
            )
            .with_attribute("pattern", Value::string(ERROR_PATTERN))
            .with_attribute("metric_name", Value::string(METRIC_NAME))
            .with_attribute("metric_namespace", Value::string(METRIC_NAMESPACE))
            .with_attribute("metric_value", Value::string("1")),
    )?;

    stack.add(
        Resource::new("metric_alarm", "error_alarm")
            .with_attribute("alarm_name", Value::string(ALARM_NAME))
            .with_attribute("alarm_description", Value::string("Errors in backup runner"))
            .with_attribute("metric_name", Value::string(METRIC_NAME))
            .with_attribute("metric_namespace", Value::string(METRIC_NAMESPACE))
            .with_attribute("statistic", Value::string("sum"))
            .with_attribute("period_seconds", Value::Int(ALARM_PERIOD_SECS))
            .with_attribute("evaluation_periods", Value::Int(ALARM_EVALUATION_PERIODS))
            .with_attribute("threshold", Value::Int(ALARM_THRESHOLD))
            .with_attribute(
                "comparison_operator",
                Value::string("greater_than_or_equal_to_threshold"),
            )
            .with_attribute("treat_missing_data", Value::string("not_breaching"))
            .with_attribute(
                "alarm_actions",
                Value::List(vec![Value::Ref("backup_alarm".to_string())]),
            ),
    )?;

    // Attaching the alarm action does not grant publish permission, so the
    // topic's resource policy allows the monitoring service explicitly.
    stack.append_to(
        "backup_alarm",
        "policy_statements",
        block([
            ("effect", Value::string("allow")),
            ("principal", Value::string("cloudwatch.amazonaws.com")),
            ("actions", Value::List(vec![Value::string("sns:Publish")])),
        ]),
    )?;

    Ok(stack)
}

/// Build a nested configuration block from key/value pairs
fn block<const N: usize>(entries: [(&str, Value); N]) -> Value {
    let map: HashMap<String, Value> = entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    Value::Map(map)
}

fn string_values(items: &[&str]) -> Value {
    Value::List(items.iter().map(|s| Value::string(*s)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cirrus_core::synth::Synthesizer;

    fn ops_context() -> Context {
        Context::new().with("email", "ops@example.com")
    }

    fn built() -> Stack {
        build_stack(&ops_context()).unwrap()
    }

    #[test]
    fn placeholder_email_fails_before_any_resource() {
        let ctx = Context::new().with("email", PLACEHOLDER_EMAIL);
        let err = build_stack(&ctx).unwrap_err();
        assert!(matches!(err, BuildError::PlaceholderEmail));
    }

    #[test]
    fn missing_email_fails() {
        let err = build_stack(&Context::new()).unwrap_err();
        assert!(matches!(err, BuildError::MissingEmail));
    }

    #[test]
    fn graph_has_expected_node_counts() {
        let stack = built();

        assert_eq!(stack.count_type("sns_topic"), 2);
        assert_eq!(stack.count_type("vpc"), 1);
        assert_eq!(stack.count_type("security_group"), 2);
        assert_eq!(stack.count_type("efs_file_system"), 1);
        assert_eq!(stack.count_type("ecs_cluster"), 1);
        assert_eq!(stack.count_type("task_definition"), 1);
        assert_eq!(stack.count_type("schedule_rule"), 1);
        assert_eq!(stack.count_type("backup_vault"), 1);
        assert_eq!(stack.count_type("backup_plan"), 1);
        assert_eq!(stack.count_type("metric_filter"), 1);
        assert_eq!(stack.count_type("metric_alarm"), 1);
        assert_eq!(stack.len(), 13);
    }

    #[test]
    fn alert_topic_has_exactly_one_subscription_with_the_email() {
        let stack = built();
        let topic = stack.resource("backup_alarm").unwrap();

        let subs = match topic.attribute("subscriptions").unwrap() {
            Value::List(items) => items,
            other => panic!("expected list, got {:?}", other),
        };
        assert_eq!(subs.len(), 1);

        match &subs[0] {
            Value::Map(sub) => {
                assert_eq!(sub["protocol"], Value::string("email"));
                assert_eq!(sub["endpoint"], Value::string("ops@example.com"));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn storage_security_group_allows_compute_and_internal_range() {
        let stack = built();
        let sg = stack.resource("efs_sg").unwrap();

        let rules = match sg.attribute("ingress").unwrap() {
            Value::List(items) => items,
            other => panic!("expected list, got {:?}", other),
        };
        assert_eq!(rules.len(), 2);

        let has_peer = rules.iter().any(|r| match r {
            Value::Map(m) => {
                m.get("peer_security_group") == Some(&Value::Ref("ecs_sg".to_string()))
                    && m.get("port") == Some(&Value::Int(NFS_PORT))
            }
            _ => false,
        });
        let has_cidr = rules.iter().any(|r| match r {
            Value::Map(m) => {
                m.get("peer_cidr") == Some(&Value::string(INTERNAL_CIDR))
                    && m.get("port") == Some(&Value::Int(NFS_PORT))
            }
            _ => false,
        });
        assert!(has_peer);
        assert!(has_cidr);
    }

    #[test]
    fn file_system_is_encrypted_with_fixed_modes() {
        let stack = built();
        let fs = stack.resource("file_system").unwrap();

        assert_eq!(fs.attribute("encrypted"), Some(&Value::Bool(true)));
        assert_eq!(
            fs.attribute("performance_mode"),
            Some(&Value::string("general_purpose"))
        );
        assert_eq!(
            fs.attribute("throughput_mode"),
            Some(&Value::string("bursting"))
        );
    }

    #[test]
    fn task_container_gets_mount_point_in_second_phase() {
        let stack = built();
        let task = stack.resource("task_definition").unwrap();

        let containers = match task.attribute("containers").unwrap() {
            Value::List(items) => items,
            other => panic!("expected list, got {:?}", other),
        };
        assert_eq!(containers.len(), 1);

        let container = match &containers[0] {
            Value::Map(m) => m,
            other => panic!("expected map, got {:?}", other),
        };
        let mounts = match container.get("mount_points").unwrap() {
            Value::List(items) => items,
            other => panic!("expected list, got {:?}", other),
        };
        assert_eq!(mounts.len(), 1);
        match &mounts[0] {
            Value::Map(m) => {
                assert_eq!(m["container_path"], Value::string(MOUNT_PATH));
                assert_eq!(m["source_volume"], Value::string(VOLUME_NAME));
                assert_eq!(m["read_only"], Value::Bool(false));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn schedule_rule_is_nightly_on_pinned_platform() {
        let stack = built();
        let rule = stack.resource("scheduled_run").unwrap();

        assert_eq!(
            rule.attribute("schedule"),
            Some(&Value::string(NIGHTLY_SCHEDULE))
        );
        match rule.attribute("target").unwrap() {
            Value::Map(target) => {
                assert_eq!(
                    target["platform_version"],
                    Value::string(FARGATE_PLATFORM_VERSION)
                );
                assert_eq!(target["cluster"], Value::Ref("cluster".to_string()));
                assert_eq!(target["subnet_type"], Value::string("public"));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn status_topic_has_no_subscriptions() {
        let stack = built();
        let topic = stack.resource("backup_topic").unwrap();
        assert!(topic.attribute("subscriptions").is_none());
    }

    #[test]
    fn vault_denies_destructive_actions_to_any_principal() {
        let stack = built();
        let vault = stack.resource("vault").unwrap();

        let statements = match vault.attribute("access_policy").unwrap() {
            Value::List(items) => items,
            other => panic!("expected list, got {:?}", other),
        };
        assert_eq!(statements.len(), 1);

        let statement = match &statements[0] {
            Value::Map(m) => m,
            other => panic!("expected map, got {:?}", other),
        };
        assert_eq!(statement["effect"], Value::string("deny"));
        assert_eq!(statement["principal"], Value::string("*"));

        let actions = match &statement["actions"] {
            Value::List(items) => items,
            other => panic!("expected list, got {:?}", other),
        };
        for denied in VAULT_DENIED_ACTIONS {
            assert!(actions.contains(&Value::string(denied)), "missing {}", denied);
        }
    }

    #[test]
    fn vault_notifies_alert_topic_of_lifecycle_events() {
        let stack = built();
        let vault = stack.resource("vault").unwrap();

        assert_eq!(
            vault.attribute("notification_topic"),
            Some(&Value::Ref("backup_alarm".to_string()))
        );
        match vault.attribute("notification_events").unwrap() {
            Value::List(events) => assert_eq!(events.len(), VAULT_NOTIFICATION_EVENTS.len()),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn backup_plan_selects_only_the_file_system() {
        let stack = built();
        let plan = stack.resource("backup_plan").unwrap();

        let selections = match plan.attribute("selections").unwrap() {
            Value::List(items) => items,
            other => panic!("expected list, got {:?}", other),
        };
        assert_eq!(selections.len(), 1);

        match &selections[0] {
            Value::Map(selection) => match &selection["resources"] {
                Value::List(resources) => {
                    assert_eq!(resources, &vec![Value::Ref("file_system".to_string())]);
                }
                other => panic!("expected list, got {:?}", other),
            },
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn alarm_constants_are_fixed() {
        let stack = built();
        let alarm = stack.resource("error_alarm").unwrap();

        assert_eq!(alarm.attribute("threshold"), Some(&Value::Int(1)));
        assert_eq!(alarm.attribute("period_seconds"), Some(&Value::Int(3600)));
        assert_eq!(alarm.attribute("evaluation_periods"), Some(&Value::Int(1)));
        assert_eq!(
            alarm.attribute("treat_missing_data"),
            Some(&Value::string("not_breaching"))
        );
        assert_eq!(
            alarm.attribute("comparison_operator"),
            Some(&Value::string("greater_than_or_equal_to_threshold"))
        );
        assert_eq!(
            alarm.attribute("alarm_actions"),
            Some(&Value::List(vec![Value::Ref("backup_alarm".to_string())]))
        );
    }

    #[test]
    fn metric_filter_matches_error_term_in_task_logs() {
        let stack = built();
        let filter = stack.resource("log_errors").unwrap();

        assert_eq!(filter.attribute("pattern"), Some(&Value::string(ERROR_PATTERN)));
        assert_eq!(
            filter.attribute("log_group"),
            Some(&Value::GetAtt(
                "task_definition".to_string(),
                "log_group_name".to_string()
            ))
        );
    }

    #[test]
    fn alert_topic_policy_allows_cloudwatch_publish() {
        let stack = built();
        let topic = stack.resource("backup_alarm").unwrap();

        let statements = match topic.attribute("policy_statements").unwrap() {
            Value::List(items) => items,
            other => panic!("expected list, got {:?}", other),
        };
        assert_eq!(statements.len(), 1);
        match &statements[0] {
            Value::Map(m) => {
                assert_eq!(m["effect"], Value::string("allow"));
                assert_eq!(m["principal"], Value::string("cloudwatch.amazonaws.com"));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn region_defaults_and_overrides() {
        assert_eq!(built().region(), DEFAULT_REGION);

        let ctx = ops_context().with("region", "eu-west-1");
        assert_eq!(build_stack(&ctx).unwrap().region(), "eu-west-1");
    }

    #[test]
    fn end_to_end_synthesis_renders_every_resource_type() {
        let stack = built();
        let template = Synthesizer::new(cirrus_aws::catalog())
            .synth(&stack)
            .unwrap();

        for aws_type in [
            "AWS::SNS::Topic",
            "AWS::EC2::VPC",
            "AWS::EC2::SecurityGroup",
            "AWS::EFS::FileSystem",
            "AWS::ECS::Cluster",
            "AWS::ECS::TaskDefinition",
            "AWS::Events::Rule",
            "AWS::Backup::BackupVault",
            "AWS::Backup::BackupPlan",
            "AWS::Logs::MetricFilter",
            "AWS::CloudWatch::Alarm",
        ] {
            assert!(template.contains_type(aws_type), "missing {}", aws_type);
        }
        assert_eq!(template.resources.len(), 13);

        let rendered = template.to_json_pretty().unwrap();
        assert!(rendered.contains("ops@example.com"));
        assert!(rendered.contains("cron(0 0 * * ? *)"));
    }
}
