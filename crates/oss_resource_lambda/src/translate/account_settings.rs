use oss_resource_core::models::{AccountSettings, CapacityLimits};

use crate::adapters::serverless_api::{
    AccountSettingsDetail, CapacityLimitsDetail, UpdateAccountSettingsRequest,
};

pub fn to_update_request(model: &AccountSettings) -> UpdateAccountSettingsRequest {
    UpdateAccountSettingsRequest {
        capacity_limits: model.capacity_limits.map(|limits| CapacityLimitsDetail {
            max_indexing_capacity_in_ocu: limits.max_indexing_capacity_in_ocu,
            max_search_capacity_in_ocu: limits.max_search_capacity_in_ocu,
        }),
    }
}

/// The service does not echo the account id; it comes from the invocation.
pub fn from_detail(detail: AccountSettingsDetail, aws_account_id: &str) -> AccountSettings {
    AccountSettings {
        account_id: Some(aws_account_id.to_string()),
        capacity_limits: detail.capacity_limits.map(|limits| CapacityLimits {
            max_indexing_capacity_in_ocu: limits.max_indexing_capacity_in_ocu,
            max_search_capacity_in_ocu: limits.max_search_capacity_in_ocu,
        }),
    }
}
