//! AWS-oriented adapters and Lambda handlers for OpenSearch Serverless
//! resource providers.
//!
//! This crate owns runtime integration details (Lambda entry points, the SDK
//! client adapter, and environment configuration) plus the per-resource
//! handlers and translators built on `oss_resource_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod runtime;
pub mod translate;

#[cfg(test)]
pub(crate) mod testing;
