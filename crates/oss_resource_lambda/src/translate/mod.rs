//! Pure mappings between resource models and control-plane shapes.
//!
//! Translators never validate, log, or call out; handlers validate first.

pub mod account_settings;
pub mod collection;
pub mod policy;
