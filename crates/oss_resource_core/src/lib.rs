//! Shared OpenSearch Serverless resource-provider primitives.
//!
//! This crate owns the handler contract (requests, progress events, callback
//! contexts), the resource models, error classification, and the service-call
//! pipeline. It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod provider;
