//! Cirrus Core
//!
//! Core library for declaring cloud resources as an immutable graph and
//! synthesizing that graph into a deployment template. Provisioning the
//! template is the job of an external engine, not this crate.

pub mod context;
pub mod resource;
pub mod schema;
pub mod stack;
pub mod synth;
