//! security_group schema definition (AWS::EC2::SecurityGroup)

use cirrus_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema for security_group (AWS::EC2::SecurityGroup)
pub fn security_group_schema() -> ResourceSchema {
    ResourceSchema::new("security_group")
        .attribute(
            AttributeSchema::new("vpc", AttributeType::String)
                .required()
                .with_description("The VPC this security group belongs to"),
        )
        .attribute(
            AttributeSchema::new("ingress", types::block_list()).with_description(
                "Inbound rules; each rule names a peer (security group or CIDR), \
                 protocol, port, and description",
            ),
        )
}
