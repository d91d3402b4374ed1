//! Cirrus AWS Catalog
//!
//! Schemas and provider-side name mappings for the AWS resource types the
//! backup-runner stack declares.
//!
//! ## Module Structure
//!
//! - `resources` - CloudFormation type names and property mappings
//! - `schemas` - Resource schemas, one module per resource type
//! - `utils` - Helper functions for value normalization

pub mod resources;
pub mod schemas;
pub mod utils;

pub use schemas::catalog;
pub use utils::normalize_region;
