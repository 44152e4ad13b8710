use oss_resource_core::models::Policy;
use serde_json::Value;

use crate::adapters::serverless_api::{
    CreatePolicyRequest, DeletePolicyRequest, ListPoliciesRequest, PolicyDetail, PolicyIdentifier,
    PolicySummary, UpdatePolicyRequest,
};

pub fn to_create_request(model: &Policy, client_token: Option<&str>) -> CreatePolicyRequest {
    CreatePolicyRequest {
        policy_type: model.policy_type.clone().unwrap_or_default(),
        name: model.name.clone().unwrap_or_default(),
        description: model.description.clone(),
        policy: model.policy.clone().unwrap_or_default(),
        client_token: client_token.map(str::to_string),
    }
}

pub fn to_identifier(model: &Policy) -> PolicyIdentifier {
    PolicyIdentifier {
        policy_type: model.policy_type.clone().unwrap_or_default(),
        name: model.name.clone().unwrap_or_default(),
    }
}

pub fn to_update_request(
    model: &Policy,
    policy_version: String,
    client_token: Option<&str>,
) -> UpdatePolicyRequest {
    UpdatePolicyRequest {
        policy_type: model.policy_type.clone().unwrap_or_default(),
        name: model.name.clone().unwrap_or_default(),
        policy_version,
        description: model.description.clone(),
        policy: model.policy.clone(),
        client_token: client_token.map(str::to_string),
    }
}

pub fn to_delete_request(model: &Policy, client_token: Option<&str>) -> DeletePolicyRequest {
    DeletePolicyRequest {
        policy_type: model.policy_type.clone().unwrap_or_default(),
        name: model.name.clone().unwrap_or_default(),
        client_token: client_token.map(str::to_string),
    }
}

pub fn to_list_request(
    policy_type: &str,
    next_token: Option<String>,
    max_results: Option<i32>,
) -> ListPoliciesRequest {
    ListPoliciesRequest {
        policy_type: policy_type.to_string(),
        next_token,
        max_results,
    }
}

/// `desired` is the model from the request. Its `Policy` text is kept when it
/// encodes the same document the service returned, so formatting and key
/// order chosen by the template author read back unchanged.
pub fn from_detail(detail: PolicyDetail, desired: Option<&Policy>) -> Policy {
    let authored = desired.and_then(|model| model.policy.as_deref());
    Policy {
        name: detail.name,
        policy_type: detail.policy_type,
        description: detail.description,
        policy: detail
            .policy
            .map(|document| policy_text(document, authored)),
    }
}

fn policy_text(document: Value, authored: Option<&str>) -> String {
    match authored {
        Some(text) if serde_json::from_str::<Value>(text).ok().as_ref() == Some(&document) => {
            text.to_string()
        }
        _ => document.to_string(),
    }
}

pub fn from_summary(summary: PolicySummary) -> Policy {
    Policy {
        name: summary.name,
        policy_type: summary.policy_type,
        ..Policy::default()
    }
}
