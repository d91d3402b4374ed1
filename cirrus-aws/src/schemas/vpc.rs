//! vpc schema definition (AWS::EC2::VPC)

use cirrus_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

/// Returns the schema for vpc (AWS::EC2::VPC)
pub fn vpc_schema() -> ResourceSchema {
    ResourceSchema::new("vpc")
        .with_description("Network the stack runs in")
        .attribute(
            AttributeSchema::new("nat_gateways", AttributeType::Int)
                .with_description("Number of NAT gateways to provision"),
        )
        .attribute(
            AttributeSchema::new("subnet_configuration", types::block_list())
                .required()
                .with_description("Subnet groups, each with a name and subnet_type"),
        )
}
