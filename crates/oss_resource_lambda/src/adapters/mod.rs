pub mod sdk;
pub mod serverless_api;
