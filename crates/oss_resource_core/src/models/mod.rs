//! Resource models as CloudFormation serializes them (PascalCase properties).

pub mod account_settings;
pub mod collection;
pub mod policy;

pub use account_settings::{AccountSettings, CapacityLimits};
pub use collection::{Collection, CollectionCallbackContext, CollectionTag, StabilizationStage};
pub use policy::Policy;
